//! Course catalogue ("mata kuliah").

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{CourseCommand, CourseQuery, CourseRepository};
use crate::domain::service_support::map_course_error;
use crate::domain::{Course, CourseDraft, CourseId, Error};

/// Course service implementing [`CourseCommand`] and [`CourseQuery`].
#[derive(Clone)]
pub struct CourseService<R> {
    courses: Arc<R>,
}

impl<R> CourseService<R> {
    pub fn new(courses: Arc<R>) -> Self {
        Self { courses }
    }
}

fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

impl<R: CourseRepository> CourseService<R> {
    async fn ensure_code_free_for(&self, id: Option<CourseId>, code: &str) -> Result<(), Error> {
        match self
            .courses
            .find_by_code(code)
            .await
            .map_err(map_course_error)?
        {
            Some(owner) if Some(owner.id) != id => Err(Error::already_use(
                "course code is already in use",
            )
            .with_details(json!({ "field": "kode_matkul" }))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R: CourseRepository> CourseCommand for CourseService<R> {
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error> {
        self.ensure_code_free_for(None, &draft.code).await?;
        let course = self
            .courses
            .insert(&draft)
            .await
            .map_err(map_course_error)?;
        info!(course_id = %course.id, code = %course.code, "course created");
        Ok(course)
    }

    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error> {
        if self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .is_none()
        {
            return Err(course_not_found(id));
        }
        self.ensure_code_free_for(Some(id), &draft.code).await?;
        self.courses
            .update(id, &draft)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(id))
    }

    async fn delete(&self, id: CourseId) -> Result<(), Error> {
        if !self.courses.delete(id).await.map_err(map_course_error)? {
            return Err(course_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: CourseRepository> CourseQuery for CourseService<R> {
    async fn find_by_id(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(id))
    }

    async fn search_by_name(&self, fragment: String) -> Result<Vec<Course>, Error> {
        self.courses
            .search_by_name(fragment.trim())
            .await
            .map_err(map_course_error)
    }
}
