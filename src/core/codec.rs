use serde::{Deserialize, Serialize};

use crate::domain::model::{Course, Instructor, PersonDetails, Student};
use crate::utils::error::Result;

/// Flat record form of a student. Registered courses live on the course
/// side of the edge and are not part of the flat store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub student_id: String,
}

impl From<&Student> for StudentRecord {
    fn from(student: &Student) -> Self {
        Self {
            name: student.person.name.clone(),
            age: student.person.age,
            email: student.person.email.clone(),
            student_id: student.student_id.clone(),
        }
    }
}

impl StudentRecord {
    pub fn into_entity(self) -> Student {
        Student::new(
            PersonDetails::new(self.name, self.age, self.email),
            self.student_id,
        )
    }
}

/// Flat record form of an instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorRecord {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub instructor_id: String,
}

impl From<&Instructor> for InstructorRecord {
    fn from(instructor: &Instructor) -> Self {
        Self {
            name: instructor.person.name.clone(),
            age: instructor.person.age,
            email: instructor.person.email.clone(),
            instructor_id: instructor.instructor_id.clone(),
        }
    }
}

impl InstructorRecord {
    pub fn into_entity(self) -> Instructor {
        Instructor::new(
            PersonDetails::new(self.name, self.age, self.email),
            self.instructor_id,
        )
    }
}

/// Flat record form of a course. The instructor and enrolled students are
/// embedded as full records, JSON-encoded into their cells, so the file
/// stays one row per course while the row carries the whole subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: String,
    pub course_name: String,
    /// JSON-encoded `InstructorRecord`, or empty when unassigned.
    pub instructor: String,
    /// JSON-encoded array of `StudentRecord`.
    pub enrolled_students: String,
}

impl CourseRecord {
    pub fn encode(
        course: &Course,
        instructor: Option<&Instructor>,
        roster: &[&Student],
    ) -> Result<Self> {
        let instructor_cell = match instructor {
            Some(instructor) => serde_json::to_string(&InstructorRecord::from(instructor))?,
            None => String::new(),
        };
        let roster_records: Vec<StudentRecord> =
            roster.iter().map(|student| StudentRecord::from(*student)).collect();

        Ok(Self {
            course_id: course.course_id.clone(),
            course_name: course.course_name.clone(),
            instructor: instructor_cell,
            enrolled_students: serde_json::to_string(&roster_records)?,
        })
    }

    /// Splits the row back into its parts. The registry merges these by id
    /// and rebuilds both sides of every enrollment edge.
    pub fn decode(&self) -> Result<DecodedCourse> {
        let instructor = if self.instructor.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&self.instructor)?)
        };
        let enrolled_students: Vec<StudentRecord> = if self.enrolled_students.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.enrolled_students)?
        };

        Ok(DecodedCourse {
            course_id: self.course_id.clone(),
            course_name: self.course_name.clone(),
            instructor,
            enrolled_students,
        })
    }
}

/// A course row decoded back into its embedded records.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCourse {
    pub course_id: String,
    pub course_name: String,
    pub instructor: Option<InstructorRecord>,
    pub enrolled_students: Vec<StudentRecord>,
}

/// Whole-repository document form: one JSON object with three named arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub students: Vec<StudentRecord>,
    pub instructors: Vec<InstructorRecord>,
    pub courses: Vec<CourseDocument>,
}

/// Course entry in the document form. `instructor` is the denormalized
/// instructor name, resolved back to an entity on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    pub course_id: String,
    pub course_name: String,
    pub instructor: Option<String>,
}

/// A denormalized name reference that failed to resolve on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub course_id: String,
    pub instructor_name: String,
}
