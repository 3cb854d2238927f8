use eduplatform_models::{AssignmentId, Difficulty, NewAssignment, UserId, parse_deadline};

use super::{Console, Shell};

const TEACHER_ITEMS: &[&str] = &[
    "Create assignment",
    "View my assignments",
    "Grade assignment",
    "Profile",
    "Notifications",
    "Logout",
];

impl<C: Console> Shell<C> {
    pub(crate) fn teacher_menu(&mut self, teacher_id: UserId) -> anyhow::Result<()> {
        loop {
            match self.console.select("Teacher Menu", TEACHER_ITEMS)? {
                0 => self.create_assignment(teacher_id)?,
                1 => self.my_assignments(teacher_id),
                2 => self.grade(teacher_id)?,
                3 => self.profile_screen(teacher_id)?,
                4 => self.notifications_screen(teacher_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn create_assignment(&mut self, teacher_id: UserId) -> anyhow::Result<()> {
        self.say("\n📝 Create Assignment");
        let title = self.console.input("Title")?;
        let description = self.console.input("Description")?;
        let subject = self.console.input("Subject")?;
        let class_id = self.console.input("Class ID")?;
        let raw_deadline = self.console.input("Deadline (YYYY-MM-DD HH:MM)")?;
        let Some(deadline) = self.check(parse_deadline(&raw_deadline)) else {
            return Ok(());
        };
        let difficulty =
            Difficulty::ALL[self.console.select("Difficulty", &Difficulty::ALL.map(Difficulty::as_str))?];

        let draft = NewAssignment {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            deadline,
            subject: subject.trim().to_string(),
            class_id: class_id.trim().to_string(),
            difficulty,
        };
        let result = self.store.create_assignment(teacher_id, draft);
        if let Some(id) = self.check(result) {
            self.say(format!("✅ Assignment created with ID: {}", id));
        }
        Ok(())
    }

    fn my_assignments(&mut self, teacher_id: UserId) {
        let lines = match self.store.assignments_by_teacher(teacher_id) {
            Ok(assignments) if assignments.is_empty() => vec!["No assignments yet.".to_string()],
            Ok(assignments) => {
                let mut lines = vec!["\n📚 My Assignments".to_string()];
                lines.extend(assignments.iter().map(|a| {
                    let status = a.status();
                    format!(
                        "ID: {} | {} | {} | Class {} | Due {} | Submissions: {} | Graded: {}",
                        status.id,
                        status.title,
                        a.subject,
                        a.class_id,
                        status.deadline.format("%Y-%m-%d %H:%M"),
                        status.submissions,
                        status.graded
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

    fn grade(&mut self, teacher_id: UserId) -> anyhow::Result<()> {
        self.my_assignments(teacher_id);
        let Some(assignment_id) = self.ask::<AssignmentId>("Assignment ID")? else {
            return Ok(());
        };
        let Some(student_id) = self.ask::<UserId>("Student ID")? else {
            return Ok(());
        };
        let Some(value) = self.ask::<i64>("Grade (1-5)")? else {
            return Ok(());
        };
        let comment = self.console.input("Comment (optional)")?;

        let result = self
            .store
            .grade_assignment(teacher_id, assignment_id, student_id, value, &comment);
        if let Some(score) = self.check(result) {
            self.say(format!("✅ Grade {} recorded!", score));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::seed_demo_accounts;
    use crate::shell::ScriptedConsole;
    use eduplatform_export::ExportManager;
    use eduplatform_store::DataStore;

    fn teacher_shell(answers: &[&str]) -> Shell<ScriptedConsole> {
        let mut store = DataStore::new();
        seed_demo_accounts(&mut store).unwrap();
        let mut script = vec!["Login", "john@edu.com", "teacher123"];
        script.extend_from_slice(answers);
        script.extend(["Logout", "Exit"]);
        Shell::new(store, ExportManager::default(), ScriptedConsole::new(script))
    }

    #[test]
    fn test_create_assignment() {
        let mut shell = teacher_shell(&[
            "Create assignment",
            "Essay",
            "Write about autumn",
            "Literature",
            "10-B",
            "2099-09-01 10:00",
            "hard",
        ]);
        shell.run().unwrap();

        assert!(shell.console().output().contains("✅ Assignment created with ID: 2"));
        let essay = shell.store().assignment(AssignmentId::new(2)).unwrap();
        assert_eq!(essay.difficulty, Difficulty::Hard);
        assert_eq!(essay.class_id, "10-B");
    }

    #[test]
    fn test_bad_deadline_aborts_creation() {
        let mut shell = teacher_shell(&[
            "Create assignment",
            "Essay",
            "",
            "Literature",
            "10-B",
            "next friday",
        ]);
        shell.run().unwrap();

        assert!(shell.console().output().contains("Invalid date format"));
        assert_eq!(shell.store().assignment_count(), 1);
    }

    #[test]
    fn test_grade_notifies_student_and_parent() {
        let mut shell = teacher_shell(&["Grade assignment", "1", "3", "5", "Well done"]);
        shell.run().unwrap();
        assert!(shell.console().output().contains("✅ Grade 5 recorded!"));

        let alice = shell.store().user(UserId::new(3)).unwrap();
        let messages: Vec<&str> = alice
            .profile
            .view_notifications()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(messages, vec!["Assignment 'Python task' graded: 5 (Well done)"]);

        let bob = shell.store().user(UserId::new(4)).unwrap();
        assert_eq!(bob.profile.notifications().len(), 1);
    }

    #[test]
    fn test_out_of_range_grade_is_rejected() {
        let mut shell = teacher_shell(&["Grade assignment", "1", "3", "9", ""]);
        shell.run().unwrap();
        assert!(shell.console().output().contains("❌"));
        assert!(shell.store().grade_records().is_empty());
    }
}
