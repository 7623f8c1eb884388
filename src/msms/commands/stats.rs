use crate::model::AppData;
use crate::store::DataStore;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub teacher_count: usize,
    pub student_count: usize,
    pub attendance_count: usize,
    /// Mean of all current students' grades, 0 when there are none.
    pub average_grade: f64,
    /// Check-ins whose student has since been removed.
    pub orphaned_attendance: usize,
    pub check_ins_by_course: BTreeMap<String, usize>,
}

pub fn run<S: DataStore>(store: &S) -> Statistics {
    compute(store.data())
}

pub fn compute(data: &AppData) -> Statistics {
    let student_count = data.students.len();
    let average_grade = if student_count == 0 {
        0.0
    } else {
        data.students.values().map(|s| s.grade).sum::<f64>() / student_count as f64
    };

    let orphaned_attendance = data
        .attendance
        .iter()
        .filter(|record| !data.students.contains_key(&record.student_id))
        .count();

    let mut check_ins_by_course = BTreeMap::new();
    for record in &data.attendance {
        *check_ins_by_course
            .entry(record.course_id.clone())
            .or_insert(0) += 1;
    }

    Statistics {
        teacher_count: data.teachers.len(),
        student_count,
        attendance_count: data.attendance.len(),
        average_grade,
        orphaned_attendance,
        check_ins_by_course,
    }
}
