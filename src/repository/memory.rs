use super::{Direction, Entity, Page, PageRequest, Repository, RepositoryError, Result, UserRepository};
use crate::models::User;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Test double keeping rows in a map ordered by id.
///
/// Only `id` is sortable. Ids marked with [`InMemoryRepository::mark_referenced`]
/// behave like rows still referenced through a foreign key.
pub struct InMemoryRepository<E: Entity<Id = i64>> {
    rows: Mutex<BTreeMap<i64, E>>,
    referenced: Mutex<HashSet<i64>>,
    next_id: AtomicI64,
    writes: AtomicUsize,
}

impl<E: Entity<Id = i64>> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            referenced: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
            writes: AtomicUsize::new(0),
        }
    }
}

impl<E: Entity<Id = i64>> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        let next_id = rows.iter().map(Entity::id).max().unwrap_or(0) + 1;
        let rows = rows.into_iter().map(|row| (row.id(), row)).collect();

        Self {
            rows: Mutex::new(rows),
            next_id: AtomicI64::new(next_id),
            ..Self::default()
        }
    }

    pub fn mark_referenced(&self, id: i64) {
        self.referenced.lock().unwrap().insert(id);
    }

    /// Number of successful inserts, updates and deletes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl<E: Entity<Id = i64>> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        Ok(self.get(id))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<E>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<E>> {
        let direction = match &request.sort {
            Some(sort) if sort.property != "id" => {
                return Err(RepositoryError::InvalidSort(sort.property.clone()))
            }
            Some(sort) => sort.direction,
            None => Direction::Asc,
        };

        let rows = self.rows.lock().unwrap();
        let mut all: Vec<E> = rows.values().cloned().collect();
        if direction == Direction::Desc {
            all.reverse();
        }

        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn insert(&self, mut entity: E) -> Result<E> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        entity.assign_id(id);
        self.rows.lock().unwrap().insert(id, entity.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<Option<E>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        if self.referenced.lock().unwrap().contains(&id) {
            return Err(RepositoryError::Integrity(format!(
                "row {} is still referenced",
                id
            )));
        }

        let removed = self.rows.lock().unwrap().remove(&id).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}
