use eduplatform_models::{AssignmentId, UserId};

use super::{Console, Shell, format_scores};

const STUDENT_ITEMS: &[&str] = &[
    "View grades",
    "View assignments",
    "Submit assignment",
    "Average grades",
    "View schedule",
    "Profile",
    "Notifications",
    "Logout",
];

impl<C: Console> Shell<C> {
    pub(crate) fn student_menu(&mut self, student_id: UserId) -> anyhow::Result<()> {
        loop {
            match self.console.select("Student Menu", STUDENT_ITEMS)? {
                0 => self.grades(student_id),
                1 => self.class_assignments(student_id),
                2 => self.submit(student_id)?,
                3 => self.averages(student_id),
                4 => self.schedule(student_id),
                5 => self.profile_screen(student_id)?,
                6 => self.notifications_screen(student_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn grades(&mut self, student_id: UserId) {
        let lines = match self.store.student(student_id) {
            Ok(student) => {
                let grades = student.view_grades(None);
                let mut lines = vec!["\n📊 My Grades".to_string()];
                if grades.is_empty() {
                    lines.push("No grades yet.".to_string());
                }
                lines.extend(
                    grades
                        .iter()
                        .map(|(subject, scores)| format!("{}: {}", subject, format_scores(scores))),
                );
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
    }

    fn class_assignments(&mut self, student_id: UserId) {
        let lines = match self.store.student(student_id) {
            Ok(student) => {
                let mut lines = vec![format!("\n📚 Assignments for {}", student.grade_label)];
                let mut any = false;
                for a in self.store.assignments_for_class(&student.grade_label) {
                    any = true;
                    let state = student
                        .status_of(a.id)
                        .map_or_else(|| "pending".to_string(), |s| s.to_string());
                    lines.push(format!(
                        "ID: {} | {} | {} | {} | Due {} | {}",
                        a.id,
                        a.title,
                        a.subject,
                        a.difficulty,
                        a.deadline.format("%Y-%m-%d %H:%M"),
                        state
                    ));
                }
                if !any {
                    lines.push("No assignments for your class.".to_string());
                }
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
    }

    fn submit(&mut self, student_id: UserId) -> anyhow::Result<()> {
        let Some(assignment_id) = self.ask::<AssignmentId>("Assignment ID")? else {
            return Ok(());
        };
        let content = self.console.input("Your answer")?;

        let result = self
            .store
            .submit_assignment(student_id, assignment_id, &content, Self::now());
        if self.check(result).is_some() {
            self.say("✅ Assignment submitted!");
        }
        Ok(())
    }

    fn averages(&mut self, student_id: UserId) {
        let lines = match self.store.student(student_id) {
            Ok(student) => {
                let mut lines = vec![format!(
                    "\n📈 Overall average: {:.2}",
                    student.calculate_average_grade(None)
                )];
                lines.extend(student.grades.keys().map(|subject| {
                    format!(
                        "{}: {:.2}",
                        subject,
                        student.calculate_average_grade(Some(subject.as_str()))
                    )
                }));
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
    }

    fn schedule(&mut self, student_id: UserId) {
        let lines = match self.store.student(student_id) {
            Ok(student) => {
                let schedules = self.store.schedules_for_class(&student.grade_label);
                let mut lines = vec![format!("\n🗓️  Schedule for {}", student.grade_label)];
                if schedules.iter().all(|s| s.lesson_count() == 0) {
                    lines.push("No lessons scheduled.".to_string());
                }
                for schedule in schedules {
                    lines.push(format!("{}:", schedule.day));
                    lines.extend(schedule.view_schedule().map(|(time, lesson)| {
                        format!("  {} {} (teacher {})", time, lesson.subject, lesson.teacher_id)
                    }));
                }
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
    }
}
