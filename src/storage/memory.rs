//! In-memory repositories
//!
//! A single [`InMemoryStore`] backs every repository type, mirroring how the
//! SQLite repositories share one [`super::Database`]. Used as the fake in
//! service tests. Cascade rules match the SQLite schema.

use std::cell::RefCell;

use chrono::{DateTime, Utc};

use super::repository::{
    ActivityRepository, ProjectRepository, StorageError, StorageResult, SubtaskRepository,
    TagRepository, TodoRepository,
};
use crate::domain::{
    Project, ProjectId, ProjectPatch, Subtask, SubtaskId, Tag, TagId, Todo, TodoActivity,
    TodoFilter, TodoId, TodoPatch,
};

#[derive(Debug, Default, Clone)]
struct MemoryState {
    /// Row data only, edges and tags live in the link vectors below
    todos: Vec<Todo>,
    /// `(todo_id, dependency_id)` in insertion order
    edges: Vec<(TodoId, TodoId)>,
    todo_tags: Vec<(TodoId, TagId)>,
    projects: Vec<Project>,
    tags: Vec<Tag>,
    subtasks: Vec<Subtask>,
    activities: Vec<TodoActivity>,
}

impl MemoryState {
    fn hydrate(&self, todo: &Todo) -> Todo {
        let mut todo = todo.clone();
        todo.dependencies = self
            .edges
            .iter()
            .filter(|(from, _)| *from == todo.id)
            .map(|(_, to)| to.clone())
            .collect();
        todo.dependents = self
            .edges
            .iter()
            .filter(|(_, to)| *to == todo.id)
            .map(|(from, _)| from.clone())
            .collect();
        todo.tags = self
            .todo_tags
            .iter()
            .filter(|(id, _)| *id == todo.id)
            .map(|(_, tag)| tag.clone())
            .collect();
        todo
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RefCell<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> InMemoryTodoRepository<'_> {
        InMemoryTodoRepository { store: self }
    }

    pub fn projects(&self) -> InMemoryProjectRepository<'_> {
        InMemoryProjectRepository { store: self }
    }

    pub fn tags(&self) -> InMemoryTagRepository<'_> {
        InMemoryTagRepository { store: self }
    }

    pub fn subtasks(&self) -> InMemorySubtaskRepository<'_> {
        InMemorySubtaskRepository { store: self }
    }

    pub fn activities(&self) -> InMemoryActivityRepository<'_> {
        InMemoryActivityRepository { store: self }
    }
}

#[derive(Clone, Copy)]
pub struct InMemoryTodoRepository<'s> {
    store: &'s InMemoryStore,
}

impl TodoRepository for InMemoryTodoRepository<'_> {
    fn create(&self, todo: &Todo) -> StorageResult<()> {
        let mut state = self.store.state.borrow_mut();

        for dependency in &todo.dependencies {
            let edge = (todo.id.clone(), dependency.clone());
            if !state.edges.contains(&edge) {
                state.edges.push(edge);
            }
        }
        for dependent in &todo.dependents {
            let edge = (dependent.clone(), todo.id.clone());
            if !state.edges.contains(&edge) {
                state.edges.push(edge);
            }
        }
        for tag in &todo.tags {
            let link = (todo.id.clone(), tag.clone());
            if !state.todo_tags.contains(&link) {
                state.todo_tags.push(link);
            }
        }

        let mut row = todo.clone();
        row.dependencies.clear();
        row.dependents.clear();
        row.tags.clear();
        state.todos.push(row);
        Ok(())
    }

    fn atomically<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<StorageError>,
    {
        let snapshot = self.store.state.borrow().clone();
        let result = f();
        if result.is_err() {
            *self.store.state.borrow_mut() = snapshot;
        }
        result
    }

    fn find_by_id(&self, id: &TodoId) -> StorageResult<Option<Todo>> {
        let state = self.store.state.borrow();
        Ok(state
            .todos
            .iter()
            .find(|todo| &todo.id == id)
            .map(|todo| state.hydrate(todo)))
    }

    fn find_all(&self, filter: &TodoFilter) -> StorageResult<Vec<Todo>> {
        let state = self.store.state.borrow();
        Ok(state
            .todos
            .iter()
            .map(|todo| state.hydrate(todo))
            .filter(|todo| filter.matches(todo))
            .collect())
    }

    fn update(
        &self,
        id: &TodoId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Todo>> {
        let mut state = self.store.state.borrow_mut();
        let Some(index) = state.todos.iter().position(|todo| &todo.id == id) else {
            return Ok(None);
        };

        let next = state.todos[index].apply(patch, now);
        state.todos[index] = next;
        Ok(Some(state.hydrate(&state.todos[index])))
    }

    fn delete(&self, id: &TodoId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.todos.len();
        state.todos.retain(|todo| &todo.id != id);
        if state.todos.len() == before {
            return Ok(false);
        }

        state.edges.retain(|(from, to)| from != id && to != id);
        state.todo_tags.retain(|(todo_id, _)| todo_id != id);
        state.subtasks.retain(|subtask| &subtask.todo_id != id);
        state.activities.retain(|activity| &activity.todo_id != id);
        Ok(true)
    }

    fn add_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<()> {
        let mut state = self.store.state.borrow_mut();
        let edge = (todo_id.clone(), dependency_id.clone());
        if !state.edges.contains(&edge) {
            state.edges.push(edge);
        }
        Ok(())
    }

    fn remove_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.edges.len();
        state
            .edges
            .retain(|(from, to)| !(from == todo_id && to == dependency_id));
        Ok(state.edges.len() != before)
    }

    fn has_dependency(&self, todo_id: &TodoId, dependency_id: &TodoId) -> StorageResult<bool> {
        let state = self.store.state.borrow();
        Ok(state
            .edges
            .iter()
            .any(|(from, to)| from == todo_id && to == dependency_id))
    }

    fn find_dependencies(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>> {
        let state = self.store.state.borrow();
        Ok(state
            .edges
            .iter()
            .filter(|(from, _)| from == todo_id)
            .map(|(_, to)| to.clone())
            .collect())
    }

    fn find_dependents(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoId>> {
        let state = self.store.state.borrow();
        Ok(state
            .edges
            .iter()
            .filter(|(_, to)| to == todo_id)
            .map(|(from, _)| from.clone())
            .collect())
    }

    fn add_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let link = (todo_id.clone(), tag_id.clone());
        if state.todo_tags.contains(&link) {
            return Ok(false);
        }
        state.todo_tags.push(link);
        Ok(true)
    }

    fn remove_tag(&self, todo_id: &TodoId, tag_id: &TagId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.todo_tags.len();
        state
            .todo_tags
            .retain(|(todo, tag)| !(todo == todo_id && tag == tag_id));
        Ok(state.todo_tags.len() != before)
    }
}

#[derive(Clone, Copy)]
pub struct InMemoryProjectRepository<'s> {
    store: &'s InMemoryStore,
}

impl ProjectRepository for InMemoryProjectRepository<'_> {
    fn create(&self, project: &Project) -> StorageResult<()> {
        self.store.state.borrow_mut().projects.push(project.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &ProjectId) -> StorageResult<Option<Project>> {
        let state = self.store.state.borrow();
        Ok(state.projects.iter().find(|p| &p.id == id).cloned())
    }

    fn find_by_name(&self, name: &str) -> StorageResult<Option<Project>> {
        let name = name.trim();
        let state = self.store.state.borrow();
        Ok(state
            .projects
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn find_all(&self) -> StorageResult<Vec<Project>> {
        let mut projects = self.store.state.borrow().projects.clone();
        projects.sort_by_key(|p| p.name.to_lowercase());
        Ok(projects)
    }

    fn update(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> StorageResult<Option<Project>> {
        let mut state = self.store.state.borrow_mut();
        let Some(project) = state.projects.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };
        *project = project.apply(patch, now);
        Ok(Some(project.clone()))
    }

    fn delete(&self, id: &ProjectId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.projects.len();
        state.projects.retain(|p| &p.id != id);
        if state.projects.len() == before {
            return Ok(false);
        }

        for todo in state.todos.iter_mut() {
            if todo.project_id.as_ref() == Some(id) {
                todo.project_id = None;
            }
        }
        Ok(true)
    }
}

#[derive(Clone, Copy)]
pub struct InMemoryTagRepository<'s> {
    store: &'s InMemoryStore,
}

impl TagRepository for InMemoryTagRepository<'_> {
    fn create(&self, tag: &Tag) -> StorageResult<()> {
        self.store.state.borrow_mut().tags.push(tag.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &TagId) -> StorageResult<Option<Tag>> {
        let state = self.store.state.borrow();
        Ok(state.tags.iter().find(|t| &t.id == id).cloned())
    }

    fn find_by_name(&self, name: &str) -> StorageResult<Option<Tag>> {
        let name = Tag::normalize(name);
        let state = self.store.state.borrow();
        Ok(state.tags.iter().find(|t| t.name == name).cloned())
    }

    fn find_all(&self) -> StorageResult<Vec<Tag>> {
        let mut tags = self.store.state.borrow().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn delete(&self, id: &TagId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.tags.len();
        state.tags.retain(|t| &t.id != id);
        if state.tags.len() == before {
            return Ok(false);
        }

        state.todo_tags.retain(|(_, tag)| tag != id);
        Ok(true)
    }
}

#[derive(Clone, Copy)]
pub struct InMemorySubtaskRepository<'s> {
    store: &'s InMemoryStore,
}

impl SubtaskRepository for InMemorySubtaskRepository<'_> {
    fn create(&self, subtask: &Subtask) -> StorageResult<()> {
        self.store.state.borrow_mut().subtasks.push(subtask.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &SubtaskId) -> StorageResult<Option<Subtask>> {
        let state = self.store.state.borrow();
        Ok(state.subtasks.iter().find(|s| &s.id == id).cloned())
    }

    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<Subtask>> {
        let state = self.store.state.borrow();
        let mut subtasks: Vec<Subtask> = state
            .subtasks
            .iter()
            .filter(|s| &s.todo_id == todo_id)
            .cloned()
            .collect();
        // stable, so equal positions keep insertion order
        subtasks.sort_by_key(|s| s.position);
        Ok(subtasks)
    }

    fn save(&self, subtask: &Subtask) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        match state.subtasks.iter_mut().find(|s| s.id == subtask.id) {
            Some(existing) => {
                existing.title = subtask.title.clone();
                existing.completed = subtask.completed;
                existing.position = subtask.position;
                existing.updated_at = subtask.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &SubtaskId) -> StorageResult<bool> {
        let mut state = self.store.state.borrow_mut();
        let before = state.subtasks.len();
        state.subtasks.retain(|s| &s.id != id);
        Ok(state.subtasks.len() != before)
    }
}

#[derive(Clone, Copy)]
pub struct InMemoryActivityRepository<'s> {
    store: &'s InMemoryStore,
}

impl ActivityRepository for InMemoryActivityRepository<'_> {
    fn append(&self, activity: &TodoActivity) -> StorageResult<()> {
        self.store
            .state
            .borrow_mut()
            .activities
            .push(activity.clone());
        Ok(())
    }

    fn find_by_todo(&self, todo_id: &TodoId) -> StorageResult<Vec<TodoActivity>> {
        let state = self.store.state.borrow();
        Ok(state
            .activities
            .iter()
            .rev()
            .filter(|a| &a.todo_id == todo_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn make_todo(title: &str) -> Todo {
        Todo::new(TodoId::generate(title, t0()), title, t0())
    }

    #[test]
    fn edges_hydrate_both_directions() {
        let store = InMemoryStore::new();
        let repo = store.todos();

        let a = make_todo("A");
        let b = make_todo("B");
        repo.create(&a).unwrap();
        repo.create(&b).unwrap();
        repo.add_dependency(&b.id, &a.id).unwrap();

        let a = repo.find_by_id(&a.id).unwrap().unwrap();
        let b = repo.find_by_id(&b.id).unwrap().unwrap();
        assert_eq!(b.dependencies, vec![a.id.clone()]);
        assert_eq!(a.dependents, vec![b.id.clone()]);
    }

    #[test]
    fn delete_removes_edges_and_children() {
        let store = InMemoryStore::new();
        let todos = store.todos();

        let a = make_todo("A");
        let b = make_todo("B");
        todos.create(&a).unwrap();
        todos.create(&b).unwrap();
        todos.add_dependency(&b.id, &a.id).unwrap();
        store
            .subtasks()
            .create(&Subtask::new(SubtaskId::generate("s", t0()), a.id.clone(), "s", 0, t0()))
            .unwrap();

        assert!(todos.delete(&a.id).unwrap());
        assert!(todos.find_dependencies(&b.id).unwrap().is_empty());
        assert!(store.subtasks().find_by_todo(&a.id).unwrap().is_empty());
        assert!(!todos.delete(&a.id).unwrap());
    }

    #[test]
    fn cycle_check_uses_default_walk() {
        let store = InMemoryStore::new();
        let repo = store.todos();

        let a = make_todo("A");
        let b = make_todo("B");
        repo.create(&a).unwrap();
        repo.create(&b).unwrap();
        repo.add_dependency(&a.id, &b.id).unwrap();

        assert!(repo.would_create_cycle(&b.id, &a.id).unwrap());
        assert!(!repo.would_create_cycle(&a.id, &b.id).unwrap());
    }
}
