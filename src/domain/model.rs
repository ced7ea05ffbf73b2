use serde::{Deserialize, Serialize};

/// Discriminates the three record types in listings, search results and
/// error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Student,
    Instructor,
    Course,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecordKind::Student => "Student",
            RecordKind::Instructor => "Instructor",
            RecordKind::Course => "Course",
        };
        f.write_str(label)
    }
}

/// Shared person attributes, held by value inside `Student` and
/// `Instructor`. Nothing dispatches over a person hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl PersonDetails {
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Greeting line for display surfaces. The caller picks the sink.
    pub fn introduce(&self) -> String {
        format!(
            "Hello, I am {}. I am {} years old. My email is {}.",
            self.name, self.age, self.email
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub person: PersonDetails,
    pub student_id: String,
    /// Course ids, in registration order.
    pub registered_courses: Vec<String>,
}

impl Student {
    pub fn new(person: PersonDetails, student_id: impl Into<String>) -> Self {
        Self {
            person,
            student_id: student_id.into(),
            registered_courses: Vec::new(),
        }
    }

    pub fn introduce(&self) -> String {
        self.person.introduce()
    }

    /// Records the student side of an enrollment edge. Returns false when
    /// the course is already registered.
    pub fn register_course(&mut self, course_id: &str) -> bool {
        if self.registered_courses.iter().any(|c| c == course_id) {
            return false;
        }
        self.registered_courses.push(course_id.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub person: PersonDetails,
    pub instructor_id: String,
    /// Course ids, de-duplicated; assignment is idempotent.
    pub assigned_courses: Vec<String>,
}

impl Instructor {
    pub fn new(person: PersonDetails, instructor_id: impl Into<String>) -> Self {
        Self {
            person,
            instructor_id: instructor_id.into(),
            assigned_courses: Vec::new(),
        }
    }

    pub fn introduce(&self) -> String {
        self.person.introduce()
    }

    /// Records a course assignment. Returns false when the course is
    /// already assigned.
    pub fn assign_course(&mut self, course_id: &str) -> bool {
        if self.assigned_courses.iter().any(|c| c == course_id) {
            return false;
        }
        self.assigned_courses.push(course_id.to_string());
        true
    }

    pub fn unassign_course(&mut self, course_id: &str) {
        self.assigned_courses.retain(|c| c != course_id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    /// Id of the assigned instructor, settable after construction.
    pub instructor: Option<String>,
    /// Student ids, in enrollment order.
    pub enrolled_students: Vec<String>,
}

impl Course {
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        instructor: Option<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            instructor,
            enrolled_students: Vec::new(),
        }
    }

    /// Records the course side of an enrollment edge. Returns false when
    /// the student is already enrolled.
    pub fn add_student(&mut self, student_id: &str) -> bool {
        if self.enrolled_students.iter().any(|s| s == student_id) {
            return false;
        }
        self.enrolled_students.push(student_id.to_string());
        true
    }

    pub fn remove_student(&mut self, student_id: &str) {
        self.enrolled_students.retain(|s| s != student_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introduce() {
        let person = PersonDetails::new("Alice", 20, "alice@x.com");
        assert_eq!(
            person.introduce(),
            "Hello, I am Alice. I am 20 years old. My email is alice@x.com."
        );

        let student = Student::new(person, "S1");
        assert!(student.introduce().starts_with("Hello, I am Alice."));
    }

    #[test]
    fn test_register_course_is_idempotent() {
        let mut student = Student::new(PersonDetails::new("Alice", 20, "alice@x.com"), "S1");
        assert!(student.register_course("C1"));
        assert!(!student.register_course("C1"));
        assert_eq!(student.registered_courses, vec!["C1"]);
    }

    #[test]
    fn test_assign_course_is_idempotent() {
        let mut instructor =
            Instructor::new(PersonDetails::new("Bob", 45, "bob@x.com"), "I1");
        assert!(instructor.assign_course("C1"));
        assert!(!instructor.assign_course("C1"));
        assert_eq!(instructor.assigned_courses, vec!["C1"]);

        instructor.unassign_course("C1");
        assert!(instructor.assigned_courses.is_empty());
    }

    #[test]
    fn test_enrollment_keeps_insertion_order() {
        let mut course = Course::new("C1", "Algorithms", None);
        course.add_student("S2");
        course.add_student("S1");
        assert_eq!(course.enrolled_students, vec!["S2", "S1"]);

        course.remove_student("S2");
        assert_eq!(course.enrolled_students, vec!["S1"]);
    }
}
