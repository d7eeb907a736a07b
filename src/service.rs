use crate::{
    context::CallContext,
    data::student::{CreateStudentForm, MAX_GRADE, MIN_GRADE, Student, UpdateStudentForm},
    error::{
        DuplicateStudentNumberSnafu, InvalidEmailSnafu, InvalidGradeSnafu,
        MissingRequiredFieldSnafu, RosterResult,
    },
    store::StudentStore,
};
use email_address::EmailAddress;
use jiff::Timestamp;
use snafu::ResultExt;
use std::{str::FromStr, sync::Arc};
use uuid::Uuid;

/// Business rules for students. Validation runs in a fixed field order and stops at the first failure.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, ctx: &CallContext, form: CreateStudentForm) -> RosterResult<Student> {
        let CreateStudentForm {
            student_number,
            name,
            email,
            class,
            grade,
        } = form;

        require_non_empty("student_number", &student_number)?;
        require_non_empty("name", &name)?;
        require_non_empty("email", &email)?;
        require_non_empty("class", &class)?;
        validate_email(&email)?;
        if let Some(grade) = grade {
            validate_grade(grade)?;
        }

        self.ensure_student_number_free(ctx, &student_number).await?;

        let now = Timestamp::now();
        let student = Student {
            id: Uuid::new_v4(),
            student_number,
            name,
            email,
            class,
            grade,
            created_at: now,
            updated_at: now,
        };

        ctx.check()?;
        self.store.save(ctx, student.clone()).await?;

        info!(student_number = %student.student_number, id = %student.id, "Created student");
        Ok(student)
    }

    pub async fn get(&self, ctx: &CallContext, student_number: &str) -> RosterResult<Student> {
        ctx.check()?;
        self.store.find_by_student_number(ctx, student_number).await
    }

    /// Every stored student, ordered by student number.
    pub async fn get_all(&self, ctx: &CallContext) -> RosterResult<Vec<Student>> {
        ctx.check()?;
        let mut students = self.store.find_all(ctx).await?;
        students.sort_unstable_by(|a, b| a.student_number.cmp(&b.student_number));
        debug!(count = students.len(), "Listed students");
        Ok(students)
    }

    pub async fn update(
        &self,
        ctx: &CallContext,
        student_number: &str,
        form: UpdateStudentForm,
    ) -> RosterResult<Student> {
        ctx.check()?;
        let mut student = self.store.find_by_student_number(ctx, student_number).await?;
        if form.is_empty() {
            debug!(student_number, "Update with no fields, only refreshing timestamp");
        }

        let UpdateStudentForm {
            student_number: new_student_number,
            name,
            email,
            class,
            grade,
        } = form;

        if let Some(new_student_number) = new_student_number {
            if new_student_number != student.student_number {
                require_non_empty("student_number", &new_student_number)?;
                self.ensure_student_number_free(ctx, &new_student_number)
                    .await?;
                student.student_number = new_student_number;
            }
        }

        if let Some(name) = name {
            require_non_empty("name", &name)?;
            student.name = name;
        }

        if let Some(email) = email {
            validate_email(&email)?;
            student.email = email;
        }

        if let Some(class) = class {
            require_non_empty("class", &class)?;
            student.class = class;
        }

        if let Some(grade) = grade {
            validate_grade(grade)?;
            student.grade = Some(grade);
        }

        student.updated_at = Timestamp::now().max(student.created_at);

        ctx.check()?;
        self.store
            .update(ctx, student_number, student.clone())
            .await?;

        info!(
            original_student_number = student_number,
            student_number = %student.student_number,
            "Updated student"
        );
        Ok(student)
    }

    pub async fn delete(&self, ctx: &CallContext, student_number: &str) -> RosterResult<()> {
        ctx.check()?;
        self.store.find_by_student_number(ctx, student_number).await?;

        ctx.check()?;
        self.store.delete(ctx, student_number).await?;

        info!(student_number, "Deleted student");
        Ok(())
    }

    pub async fn count(&self, ctx: &CallContext) -> RosterResult<usize> {
        ctx.check()?;
        self.store.count(ctx).await
    }

    //early exit only, the store's own check on write is what guarantees uniqueness
    async fn ensure_student_number_free(
        &self,
        ctx: &CallContext,
        student_number: &str,
    ) -> RosterResult<()> {
        ctx.check()?;
        let taken = self
            .store
            .exists_by_student_number(ctx, student_number)
            .await?;
        snafu::ensure!(!taken, DuplicateStudentNumberSnafu { student_number });
        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> RosterResult<()> {
    snafu::ensure!(!value.is_empty(), MissingRequiredFieldSnafu { field });
    Ok(())
}

fn validate_email(email: &str) -> RosterResult<()> {
    EmailAddress::from_str(email)
        .map(drop)
        .context(InvalidEmailSnafu)
}

fn validate_grade(grade: i32) -> RosterResult<()> {
    snafu::ensure!(
        (MIN_GRADE..=MAX_GRADE).contains(&grade),
        InvalidGradeSnafu { grade }
    );
    Ok(())
}
