//! Class timetables. One [`Schedule`] covers one class on one day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{ScheduleId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub subject: String,
    pub teacher_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub class_id: String,
    pub day: String,
    /// Keyed by time slot, e.g. `"09:00"`. Zero-padded times sort correctly.
    lessons: BTreeMap<String, Lesson>,
}

impl Schedule {
    pub fn new(id: ScheduleId, class_id: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            id,
            class_id: class_id.into(),
            day: day.into(),
            lessons: BTreeMap::new(),
        }
    }

    /// Books a lesson. Fails if the slot is already taken.
    pub fn add_lesson(&mut self, time: &str, subject: &str, teacher_id: UserId) -> bool {
        let time = time.trim();
        if self.lessons.contains_key(time) {
            return false;
        }
        self.lessons.insert(
            time.to_string(),
            Lesson {
                subject: subject.trim().to_string(),
                teacher_id,
            },
        );
        true
    }

    pub fn remove_lesson(&mut self, time: &str) -> bool {
        self.lessons.remove(time.trim()).is_some()
    }

    pub fn view_schedule(&self) -> impl Iterator<Item = (&str, &Lesson)> {
        self.lessons.iter().map(|(time, lesson)| (time.as_str(), lesson))
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_lesson_rejects_occupied_slot() {
        let mut schedule = Schedule::new(ScheduleId::new(1), "9-A", "Monday");
        assert!(schedule.add_lesson("09:00", "Mathematics", UserId::new(2)));
        assert!(!schedule.add_lesson("09:00", "Physics", UserId::new(2)));
        assert_eq!(schedule.lesson_count(), 1);
    }

    #[test]
    fn test_view_schedule_is_time_ordered() {
        let mut schedule = Schedule::new(ScheduleId::new(1), "9-A", "Monday");
        schedule.add_lesson("11:00", "Physics", UserId::new(2));
        schedule.add_lesson("08:30", "Mathematics", UserId::new(2));

        let times: Vec<&str> = schedule.view_schedule().map(|(t, _)| t).collect();
        assert_eq!(times, vec!["08:30", "11:00"]);
    }

    #[test]
    fn test_remove_lesson() {
        let mut schedule = Schedule::new(ScheduleId::new(1), "9-A", "Monday");
        schedule.add_lesson("09:00", "Mathematics", UserId::new(2));
        assert!(schedule.remove_lesson("09:00"));
        assert!(!schedule.remove_lesson("09:00"));
    }
}
