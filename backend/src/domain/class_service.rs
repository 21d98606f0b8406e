//! Class management.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ClassCommand, ClassQuery, ClassRepository, ClassRepositoryError, UserRepository,
};
use crate::domain::service_support::{map_class_error, map_user_error};
use crate::domain::{Class, ClassDraft, ClassId, ClassName, Error, JoinCode, NewClass};

/// Attempts at drawing an unused join code before giving up.
const JOIN_CODE_ATTEMPTS: usize = 3;

/// Class service implementing [`ClassCommand`] and [`ClassQuery`].
#[derive(Clone)]
pub struct ClassService<C, U> {
    classes: Arc<C>,
    users: Arc<U>,
}

impl<C, U> ClassService<C, U> {
    pub fn new(classes: Arc<C>, users: Arc<U>) -> Self {
        Self { classes, users }
    }
}

fn class_not_found(id: ClassId) -> Error {
    Error::not_found(format!("class {id} not found"))
}

fn fresh_join_code() -> JoinCode {
    JoinCode::generate(&mut rand::thread_rng())
}

impl<C, U> ClassService<C, U>
where
    C: ClassRepository,
    U: UserRepository,
{
    async fn require_class(&self, id: ClassId) -> Result<Class, Error> {
        self.classes
            .find_by_id(id)
            .await
            .map_err(map_class_error)?
            .ok_or_else(|| class_not_found(id))
    }

    async fn ensure_name_free_for(
        &self,
        id: Option<ClassId>,
        name: &ClassName,
    ) -> Result<(), Error> {
        match self
            .classes
            .find_by_name(name)
            .await
            .map_err(map_class_error)?
        {
            Some(owner) if Some(owner.id) != id => Err(Error::already_use(
                "class name is already in use",
            )
            .with_details(json!({ "field": "name" }))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<C, U> ClassCommand for ClassService<C, U>
where
    C: ClassRepository,
    U: UserRepository,
{
    async fn create(&self, draft: ClassDraft) -> Result<Class, Error> {
        self.ensure_name_free_for(None, &draft.name).await?;

        let mut attempt = 1;
        loop {
            let new_class = NewClass {
                name: draft.name.clone(),
                join_code: fresh_join_code(),
            };
            match self.classes.insert(&new_class).await {
                Ok(class) => {
                    info!(class_id = %class.id, "class created");
                    return Ok(class);
                }
                Err(ClassRepositoryError::Duplicate { constraint })
                    if constraint.contains("join_code") && attempt < JOIN_CODE_ATTEMPTS =>
                {
                    warn!(attempt, "join code collision, drawing another");
                    attempt += 1;
                }
                Err(err) => return Err(map_class_error(err)),
            }
        }
    }

    async fn update(&self, id: ClassId, draft: ClassDraft) -> Result<Class, Error> {
        self.require_class(id).await?;
        self.ensure_name_free_for(Some(id), &draft.name).await?;

        self.classes
            .rename(id, &draft.name)
            .await
            .map_err(map_class_error)?
            .ok_or_else(|| class_not_found(id))
    }

    async fn delete(&self, id: ClassId) -> Result<(), Error> {
        self.require_class(id).await?;

        let members = self
            .users
            .count_by_class(id)
            .await
            .map_err(map_user_error)?;
        if members > 0 {
            return Err(Error::conflict("class still has enrolled users")
                .with_details(json!({ "references": members })));
        }

        if !self.classes.delete(id).await.map_err(map_class_error)? {
            return Err(class_not_found(id));
        }
        info!(class_id = %id, "class deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, U> ClassQuery for ClassService<C, U>
where
    C: ClassRepository,
    U: UserRepository,
{
    async fn find_by_id(&self, id: ClassId) -> Result<Class, Error> {
        self.require_class(id).await
    }

    async fn find_by_name(&self, name: ClassName) -> Result<Class, Error> {
        self.classes
            .find_by_name(&name)
            .await
            .map_err(map_class_error)?
            .ok_or_else(|| Error::not_found(format!("class {} not found", name.as_str())))
    }
}
