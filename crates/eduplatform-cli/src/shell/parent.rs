use anyhow::anyhow;
use eduplatform_core::AppError;
use eduplatform_models::{StudentRecord, UserId};

use super::{Console, Shell, format_scores};

const PARENT_ITEMS: &[&str] = &[
    "View children",
    "Child grades",
    "Child assignments",
    "Alert settings",
    "Profile",
    "Notifications",
    "Logout",
];

const ALERT_ITEMS: &[&str] = &["Grade alerts", "Assignment due", "Attendance", "Back"];

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl<C: Console> Shell<C> {
    pub(crate) fn parent_menu(&mut self, parent_id: UserId) -> anyhow::Result<()> {
        loop {
            match self.console.select("Parent Menu", PARENT_ITEMS)? {
                0 => self.children(parent_id),
                1 => self.child_grades(parent_id)?,
                2 => self.child_assignments(parent_id)?,
                3 => self.alert_settings(parent_id)?,
                4 => self.profile_screen(parent_id)?,
                5 => self.notifications_screen(parent_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn children(&mut self, parent_id: UserId) {
        let lines = match self.store.children_of(parent_id) {
            Ok(children) if children.is_empty() => vec!["No children linked.".to_string()],
            Ok(children) => {
                let mut lines = vec!["\n👨‍👩‍👧 My Children".to_string()];
                lines.extend(children.iter().filter_map(|child| {
                    let record = child.as_student()?;
                    Some(format!(
                        "ID: {} | {} | Grade {} | Average {:.2}",
                        child.id(),
                        child.profile.full_name,
                        record.grade_label,
                        record.calculate_average_grade(None)
                    ))
                }));
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
    }

    /// Asks for a child id and checks it belongs to this parent.
    fn pick_child(&mut self, parent_id: UserId) -> anyhow::Result<Option<UserId>> {
        let Some(child_id) = self.ask::<UserId>("Child ID")? else {
            return Ok(None);
        };
        let linked = self
            .store
            .parent(parent_id)
            .and_then(|p| {
                if p.has_child(child_id) {
                    Ok(child_id)
                } else {
                    Err(AppError::not_found(anyhow!("Student {} is not linked to you", child_id)))
                }
            });
        Ok(self.check(linked))
    }

    fn child_grades(&mut self, parent_id: UserId) -> anyhow::Result<()> {
        let Some(child_id) = self.pick_child(parent_id)? else {
            return Ok(());
        };
        let lines = self
            .store
            .student(child_id)
            .map(grade_lines)
            .unwrap_or_else(|e| vec![format!("❌ {}", e)]);
        for line in lines {
            self.say(line);
        }
        Ok(())
    }

    fn child_assignments(&mut self, parent_id: UserId) -> anyhow::Result<()> {
        let Some(child_id) = self.pick_child(parent_id)? else {
            return Ok(());
        };
        let lines = match self.store.student(child_id) {
            Ok(child) => {
                let mut lines: Vec<String> = self
                    .store
                    .assignments_for_class(&child.grade_label)
                    .map(|a| {
                        let state = child
                            .status_of(a.id)
                            .map_or_else(|| "pending".to_string(), |s| s.to_string());
                        format!(
                            "ID: {} | {} | Due {} | {}",
                            a.id,
                            a.title,
                            a.deadline.format("%Y-%m-%d %H:%M"),
                            state
                        )
                    })
                    .collect();
                if lines.is_empty() {
                    lines.push("No assignments for this class.".to_string());
                }
                lines
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }
        Ok(())
    }

    fn alert_settings(&mut self, parent_id: UserId) -> anyhow::Result<()> {
        loop {
            let prefs = match self.store.parent(parent_id) {
                Ok(parent) => parent.notification_preferences,
                Err(e) => {
                    self.fail(&e);
                    return Ok(());
                }
            };
            self.say(format!(
                "Grade alerts: {} | Assignment due: {} | Attendance: {}",
                on_off(prefs.grade_alerts),
                on_off(prefs.assignment_due),
                on_off(prefs.attendance)
            ));

            let choice = self.console.select("Toggle", ALERT_ITEMS)?;
            if choice >= 3 {
                return Ok(());
            }
            if let Some(parent) = self
                .store
                .user_mut(parent_id)
                .ok()
                .and_then(|u| u.as_parent_mut())
            {
                let prefs = &mut parent.notification_preferences;
                let flag = match choice {
                    0 => &mut prefs.grade_alerts,
                    1 => &mut prefs.assignment_due,
                    _ => &mut prefs.attendance,
                };
                *flag = !*flag;
            }
        }
    }
}

fn grade_lines(child: &StudentRecord) -> Vec<String> {
    let mut lines = vec![format!("\n📊 Grades ({})", child.grade_label)];
    if child.grades.is_empty() {
        lines.push("No grades yet.".to_string());
    }
    lines.extend(
        child
            .grades
            .iter()
            .map(|(subject, scores)| format!("{}: {}", subject, format_scores(scores))),
    );
    lines.push(format!("Average: {:.2}", child.calculate_average_grade(None)));
    lines
}
