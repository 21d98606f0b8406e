//! Port for class persistence.
use async_trait::async_trait;

use crate::domain::{Class, ClassId, ClassName, NewClass};

use super::define_port_error;

define_port_error! {
    /// Errors raised by class repository adapters.
    pub enum ClassRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "class repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "class repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "class repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "class repository foreign key violated: {constraint}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn insert(&self, class: &NewClass) -> Result<Class, ClassRepositoryError>;

    /// Rename a class; returns `None` if the row vanished.
    async fn rename(
        &self,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Class>, ClassRepositoryError>;

    async fn delete(&self, id: ClassId) -> Result<bool, ClassRepositoryError>;

    async fn find_by_id(&self, id: ClassId) -> Result<Option<Class>, ClassRepositoryError>;

    async fn find_by_name(&self, name: &ClassName)
    -> Result<Option<Class>, ClassRepositoryError>;
}
