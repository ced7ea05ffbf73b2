use serde::Serialize;

use crate::config::RegistryConfig;
use crate::core::codec::{
    CourseDocument, CourseRecord, DanglingReference, DecodedCourse, InstructorRecord, Snapshot,
    StudentRecord,
};
use crate::core::persistence::PersistenceGateway;
use crate::core::repository::Repository;
use crate::domain::model::{Course, Instructor, PersonDetails, RecordKind, Student};
use crate::domain::ports::Storage;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation;

/// One row of the tabular listing surfaces (display, search, CSV export).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    #[serde(rename = "Type")]
    pub kind: RecordKind,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Details")]
    pub details: String,
}

/// Diagnostics accumulated by a load: files that were absent and
/// instructor names that failed to resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub missing_files: Vec<String>,
    pub dangling: Vec<DanglingReference>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.missing_files.is_empty() && self.dangling.is_empty()
    }
}

/// In-memory state of the whole system plus the collaborator-facing
/// operations. A front-end collects field values and calls into here.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: Repository<Student>,
    instructors: Repository<Instructor>,
    courses: Repository<Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &Repository<Student> {
        &self.students
    }

    pub fn instructors(&self) -> &Repository<Instructor> {
        &self.instructors
    }

    pub fn courses(&self) -> &Repository<Course> {
        &self.courses
    }

    // --- form-input operations -------------------------------------------

    /// Validates the form fields and appends a new student.
    pub fn add_student(
        &mut self,
        name: &str,
        age: &str,
        email: &str,
        student_id: &str,
    ) -> Result<&Student> {
        validation::validate_non_empty_string("name", name)?;
        validation::validate_non_empty_string("student_id", student_id)?;
        let age = validation::parse_age("age", age)?;
        validation::validate_email("email", email)?;

        tracing::debug!("Adding student {}", student_id);
        self.students
            .add(Student::new(PersonDetails::new(name, age, email), student_id))
    }

    /// Validates the form fields and appends a new instructor.
    pub fn add_instructor(
        &mut self,
        name: &str,
        age: &str,
        email: &str,
        instructor_id: &str,
    ) -> Result<&Instructor> {
        validation::validate_non_empty_string("name", name)?;
        validation::validate_non_empty_string("instructor_id", instructor_id)?;
        let age = validation::parse_age("age", age)?;
        validation::validate_email("email", email)?;

        tracing::debug!("Adding instructor {}", instructor_id);
        self.instructors.add(Instructor::new(
            PersonDetails::new(name, age, email),
            instructor_id,
        ))
    }

    /// Appends a course. When an instructor name is given it is resolved
    /// against the instructor list (forms offer names, not ids) and the
    /// assignment is recorded on both sides.
    pub fn add_course(
        &mut self,
        course_id: &str,
        course_name: &str,
        instructor_name: Option<&str>,
    ) -> Result<&Course> {
        validation::validate_non_empty_string("course_id", course_id)?;
        validation::validate_non_empty_string("course_name", course_name)?;
        if self.courses.contains(course_id) {
            return Err(RegistryError::DuplicateId {
                kind: RecordKind::Course,
                id: course_id.to_string(),
            });
        }

        let instructor_id = match instructor_name {
            Some(name) => {
                let instructor = self
                    .instructors
                    .find_by(|i| i.person.name == name)
                    .ok_or_else(|| RegistryError::NotFound {
                        kind: RecordKind::Instructor,
                        key: name.to_string(),
                    })?;
                Some(instructor.instructor_id.clone())
            }
            None => None,
        };

        if let Some(id) = &instructor_id {
            if let Some(instructor) = self.instructors.find_mut(id) {
                instructor.assign_course(course_id);
            }
        }

        tracing::debug!("Adding course {}", course_id);
        self.courses
            .add(Course::new(course_id, course_name, instructor_id))
    }

    // --- relationship operations -----------------------------------------

    /// Adds the student↔course enrollment edge, updating both sides.
    /// Registering an existing edge is a no-op.
    pub fn register_student(&mut self, student_id: &str, course_id: &str) -> Result<()> {
        self.courses.require(course_id)?;
        let student = self
            .students
            .find_mut(student_id)
            .ok_or_else(|| RegistryError::NotFound {
                kind: RecordKind::Student,
                key: student_id.to_string(),
            })?;

        if student.register_course(course_id) {
            if let Some(course) = self.courses.find_mut(course_id) {
                course.add_student(student_id);
            }
            tracing::debug!("Registered {} for {}", student_id, course_id);
        }
        Ok(())
    }

    /// Assigns an instructor to a course and back-fills the course's
    /// instructor reference. Assigning the same pair twice is a no-op;
    /// assigning over a different instructor moves the course.
    pub fn assign_instructor(&mut self, instructor_id: &str, course_id: &str) -> Result<()> {
        self.instructors.require(instructor_id)?;
        let course = self
            .courses
            .find_mut(course_id)
            .ok_or_else(|| RegistryError::NotFound {
                kind: RecordKind::Course,
                key: course_id.to_string(),
            })?;

        let previous = course.instructor.replace(instructor_id.to_string());
        if previous.as_deref() == Some(instructor_id) {
            return Ok(());
        }

        if let Some(previous_id) = previous {
            if let Some(instructor) = self.instructors.find_mut(&previous_id) {
                instructor.unassign_course(course_id);
            }
        }
        if let Some(instructor) = self.instructors.find_mut(instructor_id) {
            instructor.assign_course(course_id);
        }
        tracing::debug!("Assigned {} to {}", instructor_id, course_id);
        Ok(())
    }

    // --- listing and maintenance operations ------------------------------

    /// Full tabular listing in repository order.
    pub fn records(&self) -> Vec<RecordSummary> {
        self.records_matching(|_, _| true)
    }

    /// Substring search over names and identifiers.
    pub fn search(&self, query: &str) -> Vec<RecordSummary> {
        self.records_matching(|name, id| name.contains(query) || id.contains(query))
    }

    fn records_matching<F>(&self, matches: F) -> Vec<RecordSummary>
    where
        F: Fn(&str, &str) -> bool,
    {
        let mut rows = Vec::new();
        for student in self.students.iter() {
            if matches(&student.person.name, &student.student_id) {
                rows.push(RecordSummary {
                    kind: RecordKind::Student,
                    name: student.person.name.clone(),
                    id: student.student_id.clone(),
                    details: "N/A".to_string(),
                });
            }
        }
        for instructor in self.instructors.iter() {
            if matches(&instructor.person.name, &instructor.instructor_id) {
                rows.push(RecordSummary {
                    kind: RecordKind::Instructor,
                    name: instructor.person.name.clone(),
                    id: instructor.instructor_id.clone(),
                    details: "N/A".to_string(),
                });
            }
        }
        for course in self.courses.iter() {
            if matches(&course.course_name, &course.course_id) {
                rows.push(RecordSummary {
                    kind: RecordKind::Course,
                    name: course.course_name.clone(),
                    id: course.course_id.clone(),
                    details: self.roster_names(course).join(", "),
                });
            }
        }
        rows
    }

    fn roster_names(&self, course: &Course) -> Vec<String> {
        course
            .enrolled_students
            .iter()
            .filter_map(|id| self.students.find(id))
            .map(|student| student.person.name.clone())
            .collect()
    }

    /// Removes a record and every edge that references it.
    pub fn delete_record(&mut self, kind: RecordKind, id: &str) -> Result<()> {
        let not_found = || RegistryError::NotFound {
            kind,
            key: id.to_string(),
        };

        match kind {
            RecordKind::Student => {
                self.students.remove(id).ok_or_else(not_found)?;
                for course in self.courses.iter_mut() {
                    course.remove_student(id);
                }
            }
            RecordKind::Instructor => {
                self.instructors.remove(id).ok_or_else(not_found)?;
                for course in self.courses.iter_mut() {
                    if course.instructor.as_deref() == Some(id) {
                        course.instructor = None;
                    }
                }
            }
            RecordKind::Course => {
                self.courses.remove(id).ok_or_else(not_found)?;
                for student in self.students.iter_mut() {
                    student.registered_courses.retain(|c| c != id);
                }
                for instructor in self.instructors.iter_mut() {
                    instructor.unassign_course(id);
                }
            }
        }
        tracing::debug!("Deleted {} {}", kind, id);
        Ok(())
    }

    /// Renames a record in place.
    pub fn edit_record_name(&mut self, kind: RecordKind, id: &str, new_name: &str) -> Result<()> {
        validation::validate_non_empty_string("name", new_name)?;
        let not_found = || RegistryError::NotFound {
            kind,
            key: id.to_string(),
        };

        match kind {
            RecordKind::Student => {
                let student = self.students.find_mut(id).ok_or_else(not_found)?;
                student.person.name = new_name.to_string();
            }
            RecordKind::Instructor => {
                let instructor = self.instructors.find_mut(id).ok_or_else(not_found)?;
                instructor.person.name = new_name.to_string();
            }
            RecordKind::Course => {
                let course = self.courses.find_mut(id).ok_or_else(not_found)?;
                course.course_name = new_name.to_string();
            }
        }
        Ok(())
    }

    // --- document form ----------------------------------------------------

    /// Document form of the whole repository state. Course entries carry
    /// the instructor name, denormalized.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.iter().map(StudentRecord::from).collect(),
            instructors: self.instructors.iter().map(InstructorRecord::from).collect(),
            courses: self
                .courses
                .iter()
                .map(|course| CourseDocument {
                    course_id: course.course_id.clone(),
                    course_name: course.course_name.clone(),
                    instructor: course
                        .instructor
                        .as_deref()
                        .and_then(|id| self.instructors.find(id))
                        .map(|instructor| instructor.person.name.clone()),
                })
                .collect(),
        }
    }

    /// Rebuilds a registry from its document form. Courses are relinked to
    /// instructors by name; a name with no match leaves the course
    /// unlinked and is reported as a dangling reference.
    pub fn from_snapshot(snapshot: Snapshot) -> (Self, Vec<DanglingReference>) {
        let mut registry = Registry::new();
        let mut dangling = Vec::new();

        for record in snapshot.students {
            if let Err(e) = registry.students.add(record.into_entity()) {
                tracing::warn!("Skipping student on load: {}", e);
            }
        }
        for record in snapshot.instructors {
            if let Err(e) = registry.instructors.add(record.into_entity()) {
                tracing::warn!("Skipping instructor on load: {}", e);
            }
        }

        for doc in snapshot.courses {
            if registry.courses.contains(&doc.course_id) {
                tracing::warn!("Skipping duplicate course on load: {}", doc.course_id);
                continue;
            }

            let instructor_id = match &doc.instructor {
                Some(name) => {
                    let resolved = registry
                        .instructors
                        .find_by(|i| &i.person.name == name)
                        .map(|i| i.instructor_id.clone());
                    if resolved.is_none() {
                        tracing::warn!(
                            "Course {} references unknown instructor {}",
                            doc.course_id,
                            name
                        );
                        dangling.push(DanglingReference {
                            course_id: doc.course_id.clone(),
                            instructor_name: name.clone(),
                        });
                    }
                    resolved
                }
                None => None,
            };

            if let Some(id) = &instructor_id {
                if let Some(instructor) = registry.instructors.find_mut(id) {
                    instructor.assign_course(&doc.course_id);
                }
            }
            if let Err(e) = registry.courses.add(Course::new(
                doc.course_id.as_str(),
                doc.course_name.as_str(),
                instructor_id,
            )) {
                tracing::warn!("Skipping course on load: {}", e);
            }
        }

        (registry, dangling)
    }

    // --- persistence ------------------------------------------------------

    /// Saves the whole state as one document-form file.
    pub fn save_all<S: Storage>(&self, gateway: &PersistenceGateway<S>, path: &str) -> Result<()> {
        gateway.save_document(&self.snapshot(), path)
    }

    /// Restores the whole state from one document-form file. A missing
    /// file yields an empty registry and is reported, not raised.
    pub fn load_all<S: Storage>(
        gateway: &PersistenceGateway<S>,
        path: &str,
    ) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::default();
        let snapshot = match gateway.load_document(path)? {
            Some(snapshot) => snapshot,
            None => {
                report.missing_files.push(path.to_string());
                return Ok((Registry::new(), report));
            }
        };

        let (registry, dangling) = Registry::from_snapshot(snapshot);
        report.dangling = dangling;
        Ok((registry, report))
    }

    /// Record form of every course, with its instructor and roster
    /// embedded by full record.
    pub fn course_records(&self) -> Result<Vec<CourseRecord>> {
        self.courses
            .iter()
            .map(|course| {
                let instructor = course
                    .instructor
                    .as_deref()
                    .and_then(|id| self.instructors.find(id));
                let roster: Vec<&Student> = course
                    .enrolled_students
                    .iter()
                    .filter_map(|id| self.students.find(id))
                    .collect();
                CourseRecord::encode(course, instructor, &roster)
            })
            .collect()
    }

    /// 每種實體各寫一個平面檔,對應原系統的三個 CSV 檔。
    pub fn save_records<S: Storage>(
        &self,
        gateway: &PersistenceGateway<S>,
        config: &RegistryConfig,
    ) -> Result<()> {
        let students: Vec<StudentRecord> = self.students.iter().map(StudentRecord::from).collect();
        gateway.save_flat(&students, &config.students_file)?;

        let instructors: Vec<InstructorRecord> =
            self.instructors.iter().map(InstructorRecord::from).collect();
        gateway.save_flat(&instructors, &config.instructors_file)?;

        gateway.save_flat(&self.course_records()?, &config.courses_file)?;
        Ok(())
    }

    /// 從三個平面檔還原狀態。課程列內嵌的講師與學生記錄依 id 合併,
    /// 每條選課邊兩側一起重建。
    pub fn load_records<S: Storage>(
        gateway: &PersistenceGateway<S>,
        config: &RegistryConfig,
    ) -> Result<(Self, LoadReport)> {
        let mut registry = Registry::new();
        let mut report = LoadReport::default();

        let students = gateway.load_flat::<StudentRecord>(&config.students_file)?;
        if !students.existed {
            report.missing_files.push(config.students_file.clone());
        }
        for record in students.records {
            if let Err(e) = registry.students.add(record.into_entity()) {
                tracing::warn!("Skipping student on load: {}", e);
            }
        }

        let instructors = gateway.load_flat::<InstructorRecord>(&config.instructors_file)?;
        if !instructors.existed {
            report.missing_files.push(config.instructors_file.clone());
        }
        for record in instructors.records {
            if let Err(e) = registry.instructors.add(record.into_entity()) {
                tracing::warn!("Skipping instructor on load: {}", e);
            }
        }

        let courses = gateway.load_flat::<CourseRecord>(&config.courses_file)?;
        if !courses.existed {
            report.missing_files.push(config.courses_file.clone());
        }
        for row in courses.records {
            registry.adopt_course_record(row.decode()?);
        }

        Ok((registry, report))
    }

    /// Merges a decoded course row: embedded instructor and student
    /// records are merged by id, then both sides of every enrollment edge
    /// are rebuilt from the course's roster.
    fn adopt_course_record(&mut self, decoded: DecodedCourse) {
        if self.courses.contains(&decoded.course_id) {
            tracing::warn!("Skipping duplicate course on load: {}", decoded.course_id);
            return;
        }

        let instructor_id = decoded.instructor.map(|record| {
            let id = record.instructor_id.clone();
            if !self.instructors.contains(&id) {
                let _ = self.instructors.add(record.into_entity());
            }
            id
        });
        if let Some(id) = &instructor_id {
            if let Some(instructor) = self.instructors.find_mut(id) {
                instructor.assign_course(&decoded.course_id);
            }
        }

        let mut roster = Vec::new();
        for record in decoded.enrolled_students {
            let id = record.student_id.clone();
            if !self.students.contains(&id) {
                let _ = self.students.add(record.into_entity());
            }
            roster.push(id);
        }

        let course = Course::new(
            decoded.course_id.as_str(),
            decoded.course_name.as_str(),
            instructor_id,
        );
        if self.courses.add(course).is_err() {
            return;
        }
        for student_id in roster {
            if let Some(student) = self.students.find_mut(&student_id) {
                student.register_course(&decoded.course_id);
            }
            if let Some(course) = self.courses.find_mut(&decoded.course_id) {
                course.add_student(&student_id);
            }
        }
    }

    /// 匯出摘要列表 (Type,Name,ID,Details),給試算表使用。
    pub fn export_csv<S: Storage>(
        &self,
        gateway: &PersistenceGateway<S>,
        path: &str,
    ) -> Result<()> {
        gateway.save_flat(&self.records(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ValidationError;

    fn registry_with_alice() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_student("Alice", "20", "alice@x.com", "S1")
            .unwrap();
        registry
    }

    #[test]
    fn test_add_student_validates_fields() {
        let mut registry = Registry::new();

        let err = registry
            .add_student("Alice", "20", "not-an-email", "S1")
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::InvalidFormat { field: "email", .. })
        ));

        let err = registry
            .add_student("Alice", "twenty", "alice@x.com", "S1")
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::NotNumeric { .. })
        ));

        let err = registry
            .add_student("Alice", "120", "alice@x.com", "S1")
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::OutOfRange { .. })
        ));

        assert!(registry.students().is_empty());
    }

    #[test]
    fn test_add_student_rejects_duplicate_id() {
        let mut registry = registry_with_alice();
        let err = registry
            .add_student("Someone", "30", "other@x.com", "S1")
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
    }

    #[test]
    fn test_registration_updates_both_sides() {
        let mut registry = registry_with_alice();
        registry.add_course("C1", "Algorithms", None).unwrap();

        registry.register_student("S1", "C1").unwrap();

        let alice = registry.students().find("S1").unwrap();
        assert_eq!(alice.registered_courses, vec!["C1"]);
        let course = registry.courses().find("C1").unwrap();
        assert_eq!(course.enrolled_students, vec!["S1"]);
    }

    #[test]
    fn test_registration_twice_is_a_noop() {
        let mut registry = registry_with_alice();
        registry.add_course("C1", "Algorithms", None).unwrap();

        registry.register_student("S1", "C1").unwrap();
        registry.register_student("S1", "C1").unwrap();

        assert_eq!(
            registry.students().find("S1").unwrap().registered_courses,
            vec!["C1"]
        );
        assert_eq!(
            registry.courses().find("C1").unwrap().enrolled_students,
            vec!["S1"]
        );
    }

    #[test]
    fn test_register_unknown_refs() {
        let mut registry = registry_with_alice();
        assert!(matches!(
            registry.register_student("S1", "C9"),
            Err(RegistryError::NotFound {
                kind: RecordKind::Course,
                ..
            })
        ));

        registry.add_course("C1", "Algorithms", None).unwrap();
        assert!(matches!(
            registry.register_student("S9", "C1"),
            Err(RegistryError::NotFound {
                kind: RecordKind::Student,
                ..
            })
        ));
    }

    #[test]
    fn test_assign_instructor_is_idempotent() {
        let mut registry = Registry::new();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", None).unwrap();

        registry.assign_instructor("I1", "C1").unwrap();
        registry.assign_instructor("I1", "C1").unwrap();

        let bob = registry.instructors().find("I1").unwrap();
        assert_eq!(bob.assigned_courses, vec!["C1"]);
        assert_eq!(
            registry.courses().find("C1").unwrap().instructor.as_deref(),
            Some("I1")
        );
    }

    #[test]
    fn test_reassignment_moves_the_course() {
        let mut registry = Registry::new();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry
            .add_instructor("Carol", "50", "carol@x.com", "I2")
            .unwrap();
        registry.add_course("C1", "Algorithms", None).unwrap();

        registry.assign_instructor("I1", "C1").unwrap();
        registry.assign_instructor("I2", "C1").unwrap();

        assert!(registry
            .instructors()
            .find("I1")
            .unwrap()
            .assigned_courses
            .is_empty());
        assert_eq!(
            registry.instructors().find("I2").unwrap().assigned_courses,
            vec!["C1"]
        );
        assert_eq!(
            registry.courses().find("C1").unwrap().instructor.as_deref(),
            Some("I2")
        );
    }

    #[test]
    fn test_add_course_resolves_instructor_by_name() {
        let mut registry = Registry::new();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();

        registry
            .add_course("C1", "Algorithms", Some("Bob"))
            .unwrap();

        assert_eq!(
            registry.courses().find("C1").unwrap().instructor.as_deref(),
            Some("I1")
        );
        assert_eq!(
            registry.instructors().find("I1").unwrap().assigned_courses,
            vec!["C1"]
        );
    }

    #[test]
    fn test_add_course_unknown_instructor_name() {
        let mut registry = Registry::new();
        let err = registry
            .add_course("C1", "Algorithms", Some("Nobody"))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NotFound {
                kind: RecordKind::Instructor,
                ..
            }
        ));
        assert!(registry.courses().is_empty());
    }

    #[test]
    fn test_search_matches_name_and_id() {
        let mut registry = registry_with_alice();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", None).unwrap();
        registry.register_student("S1", "C1").unwrap();

        let by_name = registry.search("Ali");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].kind, RecordKind::Student);
        assert_eq!(by_name[0].details, "N/A");

        let by_id = registry.search("C1");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].kind, RecordKind::Course);
        assert_eq!(by_id[0].details, "Alice");

        assert!(registry.search("zzz").is_empty());
    }

    #[test]
    fn test_records_lists_everything_in_order() {
        let mut registry = registry_with_alice();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", Some("Bob")).unwrap();

        let rows = registry.records();
        let kinds: Vec<RecordKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Student, RecordKind::Instructor, RecordKind::Course]
        );
    }

    #[test]
    fn test_delete_student_cascades_to_courses() {
        let mut registry = registry_with_alice();
        registry.add_course("C1", "Algorithms", None).unwrap();
        registry.register_student("S1", "C1").unwrap();

        registry.delete_record(RecordKind::Student, "S1").unwrap();

        assert!(registry.students().is_empty());
        assert!(registry
            .courses()
            .find("C1")
            .unwrap()
            .enrolled_students
            .is_empty());
    }

    #[test]
    fn test_delete_instructor_unlinks_courses() {
        let mut registry = Registry::new();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", Some("Bob")).unwrap();

        registry
            .delete_record(RecordKind::Instructor, "I1")
            .unwrap();

        assert!(registry.courses().find("C1").unwrap().instructor.is_none());
    }

    #[test]
    fn test_delete_course_cascades_to_both_sides() {
        let mut registry = registry_with_alice();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", Some("Bob")).unwrap();
        registry.register_student("S1", "C1").unwrap();

        registry.delete_record(RecordKind::Course, "C1").unwrap();

        assert!(registry
            .students()
            .find("S1")
            .unwrap()
            .registered_courses
            .is_empty());
        assert!(registry
            .instructors()
            .find("I1")
            .unwrap()
            .assigned_courses
            .is_empty());
    }

    #[test]
    fn test_delete_missing_record() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.delete_record(RecordKind::Course, "C9"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_edit_record_name() {
        let mut registry = registry_with_alice();
        registry.add_course("C1", "Algorithms", None).unwrap();

        registry
            .edit_record_name(RecordKind::Student, "S1", "Alicia")
            .unwrap();
        registry
            .edit_record_name(RecordKind::Course, "C1", "Advanced Algorithms")
            .unwrap();

        assert_eq!(registry.students().find("S1").unwrap().person.name, "Alicia");
        assert_eq!(
            registry.courses().find("C1").unwrap().course_name,
            "Advanced Algorithms"
        );
        assert!(registry
            .edit_record_name(RecordKind::Instructor, "I9", "X")
            .is_err());
    }

    #[test]
    fn test_snapshot_round_trip_relinks_instructors() {
        let mut registry = registry_with_alice();
        registry
            .add_instructor("Bob", "45", "bob@x.com", "I1")
            .unwrap();
        registry.add_course("C1", "Algorithms", Some("Bob")).unwrap();
        registry.add_course("C2", "Databases", None).unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.courses[0].instructor.as_deref(), Some("Bob"));
        assert_eq!(snapshot.courses[1].instructor, None);

        let (restored, dangling) = Registry::from_snapshot(snapshot);
        assert!(dangling.is_empty());
        assert_eq!(restored.students().len(), 1);
        assert_eq!(restored.instructors().len(), 1);
        assert_eq!(restored.courses().len(), 2);

        // Relinked to the entity, not just carrying the name.
        assert_eq!(
            restored.courses().find("C1").unwrap().instructor.as_deref(),
            Some("I1")
        );
        assert_eq!(
            restored.instructors().find("I1").unwrap().assigned_courses,
            vec!["C1"]
        );
    }

    #[test]
    fn test_from_snapshot_reports_dangling_instructor() {
        let snapshot = Snapshot {
            students: vec![],
            instructors: vec![],
            courses: vec![CourseDocument {
                course_id: "C1".to_string(),
                course_name: "Algorithms".to_string(),
                instructor: Some("Ghost".to_string()),
            }],
        };

        let (restored, dangling) = Registry::from_snapshot(snapshot);
        assert_eq!(
            dangling,
            vec![DanglingReference {
                course_id: "C1".to_string(),
                instructor_name: "Ghost".to_string(),
            }]
        );
        // The course is kept, just unlinked.
        assert!(restored.courses().find("C1").unwrap().instructor.is_none());
    }
}
