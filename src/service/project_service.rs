//! Project use cases

use serde::Serialize;
use tracing::info;

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{Project, ProjectId, ProjectPatch, StatusCounts, TodoFilter, TodoStatus};
use crate::storage::{ProjectRepository, TodoRepository};

/// A project with the todo counts per status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub counts: StatusCounts,
}

pub struct ProjectService<P, T, C = SystemClock> {
    projects: P,
    todos: T,
    clock: C,
}

impl<P, T, C> ProjectService<P, T, C>
where
    P: ProjectRepository,
    T: TodoRepository,
    C: Clock,
{
    pub fn new(projects: P, todos: T, clock: C) -> Self {
        Self {
            projects,
            todos,
            clock,
        }
    }

    fn not_found(id: &str) -> ServiceError {
        ServiceError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }
    }

    fn valid_name(name: &str) -> ServiceResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation(
                "Project name must not be empty".to_string(),
            ));
        }
        Ok(name.to_string())
    }

    fn ensure_unique(&self, name: &str, except: Option<&ProjectId>) -> ServiceResult<()> {
        match self.projects.find_by_name(name)? {
            Some(existing) if Some(&existing.id) != except => Err(ServiceError::AlreadyExists {
                entity: "Project",
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn create(&self, name: &str, description: Option<String>) -> ServiceResult<Project> {
        let name = Self::valid_name(name)?;
        self.ensure_unique(&name, None)?;

        let now = self.clock.now();
        let mut project = Project::new(ProjectId::generate(&name, now), name, now);
        project.description = description.filter(|d| !d.trim().is_empty());

        self.projects.create(&project)?;
        info!(project_id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Looks a project up by id, then by name
    pub fn resolve(&self, key: &str) -> ServiceResult<Project> {
        if let Ok(id) = key.parse::<ProjectId>() {
            if let Some(project) = self.projects.find_by_id(&id)? {
                return Ok(project);
            }
        }
        self.projects
            .find_by_name(key)?
            .ok_or_else(|| Self::not_found(key))
    }

    /// Project with todo counts per status
    pub fn get(&self, key: &str) -> ServiceResult<ProjectSummary> {
        let project = self.resolve(key)?;
        let filter = TodoFilter {
            project_id: Some(project.id.clone()),
            ..TodoFilter::default()
        };

        let mut counts = StatusCounts::default();
        for todo in self.todos.find_all(&filter)? {
            match todo.status {
                TodoStatus::Pending => counts.pending += 1,
                TodoStatus::InProgress => counts.in_progress += 1,
                TodoStatus::Completed => counts.completed += 1,
            }
        }

        Ok(ProjectSummary { project, counts })
    }

    pub fn list(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.find_all()?)
    }

    pub fn update(&self, key: &str, patch: ProjectPatch) -> ServiceResult<Project> {
        if patch == ProjectPatch::default() {
            return Err(ServiceError::Validation("Nothing to update".to_string()));
        }
        let project = self.resolve(key)?;

        let mut patch = patch;
        if let Some(name) = &patch.name {
            let name = Self::valid_name(name)?;
            self.ensure_unique(&name, Some(&project.id))?;
            patch.name = Some(name);
        }

        let updated = self
            .projects
            .update(&project.id, &patch, self.clock.now())?
            .ok_or_else(|| Self::not_found(project.id.as_str()))?;
        info!(project_id = %updated.id, "updated project");
        Ok(updated)
    }

    pub fn rename(&self, key: &str, name: &str) -> ServiceResult<Project> {
        self.update(
            key,
            ProjectPatch {
                name: Some(name.to_string()),
                ..ProjectPatch::default()
            },
        )
    }

    /// Deletes a project. Its todos stay, without a project.
    pub fn delete(&self, key: &str) -> ServiceResult<Project> {
        let project = self.resolve(key)?;
        if !self.projects.delete(&project.id)? {
            return Err(Self::not_found(key));
        }
        info!(project_id = %project.id, "deleted project");
        Ok(project)
    }
}
