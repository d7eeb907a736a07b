use crate::{context::CallContext, data::student::Student, error::RosterResult};
use async_trait::async_trait;

pub mod memory;

pub use memory::InMemoryStudentStore;

/// Persistence boundary for students, keyed by student number.
///
/// `save` and `update` are the uniqueness boundary: a backend must reject a
/// colliding student number atomically, whatever checks the caller did first.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Inserts a new record, failing with `DuplicateStudentNumber` if the key is taken.
    async fn save(&self, ctx: &CallContext, student: Student) -> RosterResult<()>;

    async fn find_by_student_number(
        &self,
        ctx: &CallContext,
        student_number: &str,
    ) -> RosterResult<Student>;

    async fn find_all(&self, ctx: &CallContext) -> RosterResult<Vec<Student>>;

    /// Replaces the record stored under `original_student_number`, re-keying it
    /// if the student number changed.
    async fn update(
        &self,
        ctx: &CallContext,
        original_student_number: &str,
        student: Student,
    ) -> RosterResult<()>;

    async fn delete(&self, ctx: &CallContext, student_number: &str) -> RosterResult<()>;

    async fn exists_by_student_number(
        &self,
        ctx: &CallContext,
        student_number: &str,
    ) -> RosterResult<bool>;

    async fn count(&self, ctx: &CallContext) -> RosterResult<usize>;
}
