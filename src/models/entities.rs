//! Persisted entity types fronted by the caches.
//!
//! Each type implements [`DomainObject`] with an explicit field table in place
//! of runtime reflection.

use std::fmt;

use crate::persistence::DomainObject;

/// Role of a system user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Hcp,
    Admin,
    Lab,
    Er,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Patient => "ROLE_PATIENT",
            Role::Hcp => "ROLE_HCP",
            Role::Admin => "ROLE_ADMIN",
            Role::Lab => "ROLE_LAB",
            Role::Er => "ROLE_ER",
        };
        f.write_str(name)
    }
}

/// Account record, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub role: Role,
    pub enabled: bool,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            enabled: true,
        }
    }
}

impl DomainObject for User {
    type Id = String;
    const TYPE_NAME: &'static str = "User";

    fn id(&self) -> String {
        self.username.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "username" => Some(self.username.clone()),
            "role" => Some(self.role.to_string()),
            "enabled" => Some(self.enabled.to_string()),
            _ => None,
        }
    }
}

/// Patient demographics, keyed by the owning user's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl Patient {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl DomainObject for Patient {
    type Id = String;
    const TYPE_NAME: &'static str = "Patient";

    fn id(&self) -> String {
        self.username.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "username" => Some(self.username.clone()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "email" => self.email.clone(),
            _ => None,
        }
    }
}

/// Prescription, keyed by a numeric id assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub id: i64,
    pub patient: String,
    pub drug_code: String,
    pub dosage_mg: u32,
}

impl Prescription {
    pub fn new(
        id: i64,
        patient: impl Into<String>,
        drug_code: impl Into<String>,
        dosage_mg: u32,
    ) -> Self {
        Self {
            id,
            patient: patient.into(),
            drug_code: drug_code.into(),
            dosage_mg,
        }
    }
}

impl DomainObject for Prescription {
    type Id = i64;
    const TYPE_NAME: &'static str = "Prescription";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "patient" => Some(self.patient.clone()),
            "drug_code" => Some(self.drug_code.clone()),
            "dosage_mg" => Some(self.dosage_mg.to_string()),
            _ => None,
        }
    }
}
