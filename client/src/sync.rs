//! Pipeline and stores wired together.

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use std::sync::Arc;
use todo_sync_auth::SessionStore;
use todo_sync_core::environment::Navigator;
use todo_sync_core::storage::{FileStorage, KeyValueStorage, NullStorage};
use todo_sync_core::types::{Identity, Todo, TodoId, TodoPage, TodoStatus};
use todo_sync_projections::TodoStore;
use todo_sync_runtime::SubscriptionId;

/// Client-side state of one user of the list service.
///
/// Each method runs a service operation and, once the result is known,
/// applies it to the session or the todo list. A failed operation leaves
/// both stores untouched, except that a rejected credential ends the session
/// and empties the list.
///
/// Operations are not sequenced against each other. Two overlapping edits of
/// the same todo apply in response order, not request order.
pub struct TodoSync {
    api: ApiClient,
    todos: TodoStore,
    page_size: u32,
    clear_on_logout: SubscriptionId,
}

impl TodoSync {
    /// Build the client described by `config`.
    ///
    /// The session is persisted in `config.state_file` when set, otherwise
    /// it lives in memory only.
    #[must_use]
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Self {
        let storage: Arc<dyn KeyValueStorage> = match &config.state_file {
            Some(path) => Arc::new(FileStorage::new(path.clone())),
            None => Arc::new(NullStorage),
        };
        Self::new(config, SessionStore::new(storage), navigator)
    }

    /// Build a client over an existing session.
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        let api = ApiClient::new(config, session.clone()).with_navigator(navigator);
        let todos = TodoStore::new();

        let list = todos.clone();
        let clear_on_logout = session.subscribe_authenticated(move |authenticated| {
            if !authenticated {
                list.clear();
            }
        });

        Self {
            api,
            todos,
            page_size: config.page_size,
            clear_on_logout,
        }
    }

    /// The request pipeline.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// The todo list.
    #[must_use]
    pub const fn todos(&self) -> &TodoStore {
        &self.todos
    }

    /// Create an account and start a session for it.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the session is unchanged.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<Identity> {
        let auth = self.api.register(username, email, password).await?;
        self.session().login(auth.token, auth.user.clone());
        Ok(auth.user)
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the session is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let auth = self.api.login(email, password).await?;
        self.session().login(auth.token, auth.user.clone());
        Ok(auth.user)
    }

    /// End the session.
    ///
    /// The todo list is emptied by the logout itself.
    pub fn sign_out(&self) {
        self.session().logout();
    }

    /// Fetch the profile and replace the cached identity with it.
    ///
    /// # Errors
    ///
    /// Propagates the service error.
    pub async fn refresh_profile(&self) -> Result<Identity> {
        let identity = self.api.profile().await?;
        if let Some(token) = self.session().token() {
            self.session().login(token, identity.clone());
        }
        Ok(identity)
    }

    /// Load page `page` (1-based) and show it in place of the current list.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn load_page(&self, page: u32) -> Result<TodoPage> {
        let page = self.api.todos(page.max(1), self.page_size).await?;
        self.todos.replace_all(page.items.clone());
        Ok(page)
    }

    /// Create a todo and put it at the front of the list.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn create(&self, title: &str, description: &str) -> Result<Todo> {
        let todo = self.api.create_todo(title, description).await?;
        self.todos.add(todo.clone());
        Ok(todo)
    }

    /// Change title and description of a todo.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn edit(&self, id: TodoId, title: &str, description: &str) -> Result<Todo> {
        let todo = self.api.update_todo(id, title, description).await?;
        self.todos.replace(todo.clone());
        Ok(todo)
    }

    /// Set the completion state of a todo.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn set_status(&self, id: TodoId, status: TodoStatus) -> Result<Todo> {
        let todo = self.api.update_todo_status(id, status).await?;
        self.todos.replace(todo.clone());
        Ok(todo)
    }

    /// Flip the completion state of a todo.
    ///
    /// The current state is taken from the list, or fetched when the todo
    /// is not loaded.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn toggle(&self, id: TodoId) -> Result<Todo> {
        let current = match self.todos.get(id) {
            Some(todo) => todo.status,
            None => self.api.todo(id).await?.status,
        };
        self.set_status(id, current.toggled()).await
    }

    /// Delete a todo.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the list is unchanged.
    pub async fn delete(&self, id: TodoId) -> Result<()> {
        self.api.delete_todo(id).await?;
        self.todos.remove(id);
        Ok(())
    }
}

impl Drop for TodoSync {
    fn drop(&mut self) {
        self.session().unsubscribe(self.clear_on_logout);
    }
}

impl std::fmt::Debug for TodoSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoSync")
            .field("api", &self.api)
            .field("todos", &self.todos)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
