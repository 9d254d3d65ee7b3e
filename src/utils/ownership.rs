//! Ownership-chain guards shared by every nested-entity use case.
//!
//! Modules and resources are only reachable through their parent course:
//! the caller must own the course, and the path-declared course id must match
//! the child's actual parent. A mismatched parent is reported as NOT_FOUND so
//! ids cannot be enumerated across courses.

use uuid::Uuid;

use crate::modules::courses::model::Course;
use crate::utils::errors::AppError;

/// Implemented by entities that live under a course (modules, resources).
pub trait CourseScoped {
    /// Entity name used in error messages, e.g. "Module".
    const ENTITY: &'static str;

    fn course_id(&self) -> Uuid;
}

/// Fail FORBIDDEN unless `user_id` owns the course. `action` completes the
/// sentence "You are not allowed to ...".
pub fn ensure_owner(course: &Course, user_id: Uuid, action: &str) -> Result<(), AppError> {
    if course.user_id != user_id {
        return Err(AppError::forbidden(format!(
            "You are not allowed to {}",
            action
        )));
    }
    Ok(())
}

/// Resolve a looked-up child against the path-declared parent course.
/// Absent child and wrong-parent child are both NOT_FOUND.
pub fn ensure_in_course<T: CourseScoped>(child: Option<T>, course_id: Uuid) -> Result<T, AppError> {
    let child =
        child.ok_or_else(|| AppError::not_found(format!("{} not found", T::ENTITY)))?;

    if child.course_id() != course_id {
        return Err(AppError::not_found(format!(
            "{} not found in this course",
            T::ENTITY
        )));
    }

    Ok(child)
}
