use crate::{
    context::CallContext,
    data::student::Student,
    error::{DuplicateStudentNumberSnafu, RosterResult, StudentNotFoundSnafu},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::OptionExt;
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::RwLock;

/// Reference [`StudentStore`]. Readers share the lock, writers hold it exclusively,
/// so every single operation is atomic. Contexts are ignored as nothing here waits on I/O.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    students: RwLock<HashMap<String, Student>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn save(&self, _ctx: &CallContext, student: Student) -> RosterResult<()> {
        let mut students = self.students.write().await;

        match students.entry(student.student_number.clone()) {
            Entry::Occupied(occupied) => DuplicateStudentNumberSnafu {
                student_number: occupied.key(),
            }
            .fail(),
            Entry::Vacant(vacant) => {
                vacant.insert(student);
                Ok(())
            }
        }
    }

    async fn find_by_student_number(
        &self,
        _ctx: &CallContext,
        student_number: &str,
    ) -> RosterResult<Student> {
        self.students
            .read()
            .await
            .get(student_number)
            .cloned()
            .context(StudentNotFoundSnafu { student_number })
    }

    async fn find_all(&self, _ctx: &CallContext) -> RosterResult<Vec<Student>> {
        Ok(self.students.read().await.values().cloned().collect())
    }

    async fn update(
        &self,
        _ctx: &CallContext,
        original_student_number: &str,
        student: Student,
    ) -> RosterResult<()> {
        let mut students = self.students.write().await;

        snafu::ensure!(
            students.contains_key(original_student_number),
            StudentNotFoundSnafu {
                student_number: original_student_number
            }
        );

        if student.student_number != original_student_number {
            snafu::ensure!(
                !students.contains_key(&student.student_number),
                DuplicateStudentNumberSnafu {
                    student_number: student.student_number.as_str()
                }
            );
            students.remove(original_student_number);
        }

        students.insert(student.student_number.clone(), student);
        Ok(())
    }

    async fn delete(&self, _ctx: &CallContext, student_number: &str) -> RosterResult<()> {
        self.students
            .write()
            .await
            .remove(student_number)
            .map(drop)
            .context(StudentNotFoundSnafu { student_number })
    }

    async fn exists_by_student_number(
        &self,
        _ctx: &CallContext,
        student_number: &str,
    ) -> RosterResult<bool> {
        Ok(self.students.read().await.contains_key(student_number))
    }

    async fn count(&self, _ctx: &CallContext) -> RosterResult<usize> {
        Ok(self.students.read().await.len())
    }
}
