//! Tag use cases
//!
//! Attaching and detaching tags lives on [`super::TodoService`] since those
//! are recorded in the todo's activity log.

use tracing::info;

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{Tag, TagId};
use crate::storage::TagRepository;

pub struct TagService<G, C = SystemClock> {
    tags: G,
    clock: C,
}

impl<G, C> TagService<G, C>
where
    G: TagRepository,
    C: Clock,
{
    pub fn new(tags: G, clock: C) -> Self {
        Self { tags, clock }
    }

    pub fn create(&self, name: &str, color: Option<String>) -> ServiceResult<Tag> {
        let name = Tag::normalize(name);
        if name.is_empty() {
            return Err(ServiceError::Validation(
                "Tag name must not be empty".to_string(),
            ));
        }
        if self.tags.find_by_name(&name)?.is_some() {
            return Err(ServiceError::AlreadyExists { entity: "Tag", name });
        }

        let now = self.clock.now();
        let mut tag = Tag::new(TagId::generate(&name, now), &name, now);
        tag.color = color.filter(|c| !c.trim().is_empty());

        self.tags.create(&tag)?;
        info!(tag_id = %tag.id, name = %tag.name, "created tag");
        Ok(tag)
    }

    /// Looks a tag up by id, then by name
    pub fn resolve(&self, key: &str) -> ServiceResult<Tag> {
        if let Ok(id) = key.parse::<TagId>() {
            if let Some(tag) = self.tags.find_by_id(&id)? {
                return Ok(tag);
            }
        }
        self.tags
            .find_by_name(key)?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Tag",
                id: key.to_string(),
            })
    }

    pub fn list(&self) -> ServiceResult<Vec<Tag>> {
        Ok(self.tags.find_all()?)
    }

    /// Deletes a tag and unlinks it from every todo
    pub fn delete(&self, key: &str) -> ServiceResult<Tag> {
        let tag = self.resolve(key)?;
        self.tags.delete(&tag.id)?;
        info!(tag_id = %tag.id, "deleted tag");
        Ok(tag)
    }
}
