//! Integration Tests for the cache-aside repository
//!
//! Verifies that reads fill the cache and writes keep it in lockstep with the backend.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use domain_cache::models::{Patient, Prescription, Role, User};
use domain_cache::persistence::{Backend, MemoryBackend, PersistenceError, Result};
use domain_cache::{CacheConfig, CacheRegistry, DomainObject, Repository, TypedCache};

// == Test Backend ==

/// Wraps a MemoryBackend, counting loads and optionally failing writes.
struct CountingBackend<E: DomainObject> {
    inner: MemoryBackend<E>,
    loads: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl<E: DomainObject> CountingBackend<E> {
    fn new(records: Vec<E>) -> Self {
        Self {
            inner: MemoryBackend::with_records(records),
            loads: Arc::new(AtomicUsize::new(0)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(PersistenceError::Backend("database unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl<E: DomainObject> Backend<E> for CountingBackend<E> {
    fn load(&self, id: &E::Id) -> Result<Option<E>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(id)
    }

    fn save(&self, entity: &E) -> Result<()> {
        self.check_writable()?;
        self.inner.save(entity)
    }

    fn delete(&self, id: &E::Id) -> Result<()> {
        self.check_writable()?;
        self.inner.delete(id)
    }

    fn all(&self) -> Result<Vec<E>> {
        self.inner.all()
    }

    fn delete_all(&self) -> Result<usize> {
        self.check_writable()?;
        self.inner.delete_all()
    }
}

fn patients(records: Vec<Patient>) -> Repository<Patient, CountingBackend<Patient>> {
    Repository::new(
        &CacheRegistry::new(),
        CacheConfig::default(),
        CountingBackend::new(records),
    )
}

fn alice() -> Patient {
    Patient::new("alice", "Alice", "Smith").with_email("alice@example.org")
}

fn key(username: &str) -> String {
    username.to_string()
}

// == Reads ==

#[test]
fn test_miss_loads_once_then_hits() {
    let repo = patients(vec![alice()]);

    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), Some(alice()));
    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), Some(alice()));
    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), Some(alice()));

    assert_eq!(repo.backend().loads.load(Ordering::SeqCst), 1);
    assert_eq!(repo.cache().stats().hits, 2);
}

#[test]
fn test_missing_record_is_not_cached() {
    let repo = patients(vec![]);

    assert_eq!(repo.get_by_id(&key("ghost")).unwrap(), None);
    assert_eq!(repo.get_by_id(&key("ghost")).unwrap(), None);

    assert_eq!(repo.backend().loads.load(Ordering::SeqCst), 2);
    assert!(repo.cache().is_empty());
}

#[test]
fn test_absent_id_touches_nothing() {
    let repo = patients(vec![alice()]);

    assert_eq!(repo.get_by_id_opt(None).unwrap(), None);

    assert_eq!(repo.backend().loads.load(Ordering::SeqCst), 0);
    assert_eq!(repo.cache().stats().misses, 0);
}

#[test]
fn test_get_by_field_caches_match() {
    let repo = patients(vec![alice(), Patient::new("bob", "Bob", "Jones")]);

    let found = repo.get_by("last_name", "Jones").unwrap().unwrap();
    assert_eq!(found.username, "bob");
    assert!(repo.cache().contains(&key("bob")));

    // served from the cache now
    repo.get_by_id(&key("bob")).unwrap();
    assert_eq!(repo.backend().loads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_get_by_unknown_field_never_matches() {
    let repo = patients(vec![alice()]);

    assert_eq!(repo.get_by("ssn", "alice").unwrap(), None);
    assert!(repo.cache().is_empty());
}

#[test]
fn test_get_where_and_get_all_read_backend() {
    let repo = Repository::new(
        &CacheRegistry::new(),
        CacheConfig::default(),
        MemoryBackend::with_records([
            Prescription::new(1, "alice", "0000-0000-01", 10),
            Prescription::new(2, "bob", "0000-0000-02", 20),
            Prescription::new(3, "alice", "0000-0000-03", 30),
        ]),
    );

    let for_alice = repo.get_where(|p| p.patient == "alice").unwrap();
    let ids: Vec<i64> = for_alice.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(repo.get_all().unwrap().len(), 3);
    assert!(repo.cache().is_empty());
}

#[test]
fn test_fill_after_load_keeps_newer_cached_copy() {
    let registry = CacheRegistry::new();
    let cache = registry.register_or_get::<Patient>(CacheConfig::default());
    let mut renamed = alice();
    renamed.last_name = "Jones".to_string();

    let repo = Repository::new(
        &registry,
        CacheConfig::default(),
        SaveDuringLoad {
            stored: alice(),
            saved: renamed.clone(),
            cache: cache.clone(),
        },
    );

    // The reader gets the row it loaded ...
    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), Some(alice()));
    // ... but the cache keeps the copy saved while the load was in flight.
    assert_eq!(cache.get(&key("alice")), Some(renamed));
}

/// Backend whose load races with a writer: the writer's save reaches the
/// cache after the row was read, before the reader fills the cache.
struct SaveDuringLoad {
    stored: Patient,
    saved: Patient,
    cache: TypedCache<String, Patient>,
}

impl Backend<Patient> for SaveDuringLoad {
    fn load(&self, _id: &String) -> Result<Option<Patient>> {
        let row = self.stored.clone();
        self.cache.put(self.saved.id(), self.saved.clone());
        Ok(Some(row))
    }

    fn save(&self, _entity: &Patient) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _id: &String) -> Result<()> {
        Ok(())
    }

    fn all(&self) -> Result<Vec<Patient>> {
        Ok(vec![self.stored.clone()])
    }

    fn delete_all(&self) -> Result<usize> {
        Ok(0)
    }
}

// == Writes ==

#[test]
fn test_save_writes_through() {
    let repo = patients(vec![]);

    repo.save(alice()).unwrap();

    assert_eq!(repo.cache().get(&key("alice")), Some(alice()));
    assert_eq!(repo.backend().inner.len(), 1);
}

#[test]
fn test_save_replaces_cached_copy() {
    let repo = patients(vec![alice()]);
    repo.get_by_id(&key("alice")).unwrap();

    let mut updated = alice();
    updated.last_name = "Jones".to_string();
    repo.save(updated.clone()).unwrap();

    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), Some(updated));
    assert_eq!(repo.backend().loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delete_invalidates() {
    let repo = patients(vec![alice()]);
    repo.get_by_id(&key("alice")).unwrap();

    repo.delete(&key("alice")).unwrap();

    assert!(!repo.cache().contains(&key("alice")));
    assert_eq!(repo.get_by_id(&key("alice")).unwrap(), None);
}

#[test]
fn test_delete_missing_surfaces_backend_error() {
    let repo = patients(vec![]);

    let err = repo.delete(&key("ghost")).unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound { entity: "Patient", .. }));
}

#[test]
fn test_failed_write_leaves_cache_untouched() {
    let repo = patients(vec![alice()]);
    repo.get_by_id(&key("alice")).unwrap();
    repo.backend().fail_writes.store(true, Ordering::SeqCst);

    let mut updated = alice();
    updated.first_name = "Alicia".to_string();
    assert!(repo.save(updated).is_err());
    assert!(repo.delete(&key("alice")).is_err());
    assert!(repo.delete_all().is_err());

    assert_eq!(repo.cache().get(&key("alice")), Some(alice()));
}

#[test]
fn test_delete_all_clears_cache() {
    let repo = patients(vec![alice(), Patient::new("bob", "Bob", "Jones")]);
    repo.get_by_id(&key("alice")).unwrap();
    repo.get_by_id(&key("bob")).unwrap();

    assert_eq!(repo.delete_all().unwrap(), 2);

    assert!(repo.cache().is_empty());
    assert!(repo.get_all().unwrap().is_empty());
}

// == Shared registry ==

#[test]
fn test_repositories_share_the_type_cache() {
    let registry = CacheRegistry::new();
    let backend = Arc::new(MemoryBackend::<User>::new());

    let first = Repository::new(&registry, CacheConfig::from_secs(5, 60), SharedUsers(backend.clone()));
    let second = Repository::new(&registry, CacheConfig::from_secs(500, 1), SharedUsers(backend));

    first.save(User::new("hcp", Role::Hcp)).unwrap();

    assert!(first.cache().ptr_eq(second.cache()));
    assert_eq!(second.cache().capacity(), 5);
    assert_eq!(second.cache().get(&key("hcp")).map(|u| u.role), Some(Role::Hcp));
}

/// Backend shared between two repositories.
struct SharedUsers(Arc<MemoryBackend<User>>);

impl Backend<User> for SharedUsers {
    fn load(&self, id: &String) -> Result<Option<User>> {
        self.0.load(id)
    }

    fn save(&self, entity: &User) -> Result<()> {
        self.0.save(entity)
    }

    fn delete(&self, id: &String) -> Result<()> {
        self.0.delete(id)
    }

    fn all(&self) -> Result<Vec<User>> {
        self.0.all()
    }

    fn delete_all(&self) -> Result<usize> {
        self.0.delete_all()
    }
}
