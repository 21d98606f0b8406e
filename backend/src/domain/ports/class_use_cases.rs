//! Driving ports for classes.

use async_trait::async_trait;

use crate::domain::{Class, ClassDraft, ClassId, ClassName, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassCommand: Send + Sync {
    async fn create(&self, draft: ClassDraft) -> Result<Class, Error>;

    async fn update(&self, id: ClassId, draft: ClassDraft) -> Result<Class, Error>;

    /// Delete a class that no user references.
    async fn delete(&self, id: ClassId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassQuery: Send + Sync {
    async fn find_by_id(&self, id: ClassId) -> Result<Class, Error>;

    async fn find_by_name(&self, name: ClassName) -> Result<Class, Error>;
}
