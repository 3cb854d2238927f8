use anyhow::anyhow;
use eduplatform_core::{AppError, permissions};
use eduplatform_export::ExportFormat;
use eduplatform_models::{Role, UserId};
use eduplatform_store::{NewRoleDetails, NewUser, Report, ReportKind};
use std::path::PathBuf;

use super::{Console, Shell};

const ADMIN_ITEMS: &[&str] = &[
    "Register user",
    "View all users",
    "Generate reports",
    "Export all formats",
    "Export to XLSX",
    "Export to CSV",
    "Export to SQL",
    "View export log",
    "System statistics",
    "Link parent to child",
    "Add schedule lesson",
    "Remove schedule lesson",
    "Profile",
    "Notifications",
    "Logout",
];

impl<C: Console> Shell<C> {
    pub(crate) fn admin_menu(&mut self, admin_id: UserId) -> anyhow::Result<()> {
        loop {
            match self.console.select("Admin Menu", ADMIN_ITEMS)? {
                0 => self.register_user()?,
                1 => self.list_users(),
                2 => self.reports(admin_id)?,
                3 => self.export_everything(admin_id),
                4 => self.export_single(admin_id, ExportFormat::Xlsx)?,
                5 => self.export_single(admin_id, ExportFormat::Csv)?,
                6 => self.export_single(admin_id, ExportFormat::Sql)?,
                7 => self.export_log(),
                8 => self.show_report(admin_id, ReportKind::System),
                9 => self.link_parent()?,
                10 => self.add_lesson()?,
                11 => self.remove_lesson()?,
                12 => self.profile_screen(admin_id)?,
                13 => self.notifications_screen(admin_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn register_user(&mut self) -> anyhow::Result<()> {
        self.say("\n📝 Register New User");
        let role = Role::ALL[self.console.select("Role", &Role::ALL.map(Role::name))?];
        let full_name = self.console.input("Full name")?;
        let email = self.console.input("Email")?;
        let password = self.console.password("Password")?;

        let details = match role {
            Role::Student => NewRoleDetails::Student {
                grade_label: self.console.input("Grade (e.g. 9-A)")?,
            },
            Role::Teacher => {
                let subjects = split_list(&self.console.input("Subjects (comma-separated)")?);
                let classes = split_list(&self.console.input("Classes (comma-separated)")?);
                let hours = self.console.input("Weekly hours [0]")?;
                let workload = if hours.trim().is_empty() {
                    0
                } else {
                    match hours.trim().parse::<u32>() {
                        Ok(hours) => hours,
                        Err(_) => {
                            self.say("❌ Weekly hours must be a whole number!");
                            return Ok(());
                        }
                    }
                };
                NewRoleDetails::Teacher {
                    subjects,
                    classes,
                    workload,
                }
            }
            Role::Parent => NewRoleDetails::Parent,
            Role::Admin => NewRoleDetails::Admin,
        };

        let result = self
            .store
            .register_user(NewUser::new(full_name, email, password, details));
        if let Some(id) = self.check(result) {
            self.say(format!("✅ {} registered successfully! (ID: {})", role, id));
        }
        Ok(())
    }

    fn list_users(&mut self) {
        let mut lines = vec!["\n👥 All Users".to_string(), "-".repeat(60)];
        lines.extend(self.store.users().map(|u| {
            format!(
                "ID: {} | {} | {} | {}",
                u.id(),
                u.profile.full_name,
                u.profile.email,
                u.role()
            )
        }));
        for line in lines {
            self.say(line);
        }
    }

    fn reports(&mut self, admin_id: UserId) -> anyhow::Result<()> {
        let labels: Vec<String> = ReportKind::ALL.iter().map(ToString::to_string).collect();
        let mut items: Vec<&str> = labels.iter().map(String::as_str).collect();
        items.push("Back");

        let choice = self.console.select("System Reports", &items)?;
        if let Some(kind) = ReportKind::ALL.get(choice) {
            self.show_report(admin_id, *kind);
        }
        Ok(())
    }

    fn show_report(&mut self, admin_id: UserId, kind: ReportKind) {
        let result = self.store.generate_report(admin_id, kind);
        if let Some(report) = self.check(result) {
            for line in render_report(&report) {
                self.say(line);
            }
        }
    }

    fn require_export_permission(&self, admin_id: UserId) -> Result<(), AppError> {
        let allowed = self
            .store
            .user(admin_id)?
            .as_admin()
            .is_some_and(|a| a.has_permission(permissions::DATA_EXPORT));
        if allowed {
            Ok(())
        } else {
            Err(AppError::forbidden(anyhow!("Missing permission {}", permissions::DATA_EXPORT)))
        }
    }

    fn export_everything(&mut self, admin_id: UserId) {
        let allowed = self.require_export_permission(admin_id);
        if self.check(allowed).is_none() {
            return;
        }
        self.say("📤 Exporting to all formats...");
        if self.exports.export_all(&self.store) {
            self.say("✅ All exports completed successfully!");
        } else {
            self.say("❌ Some exports failed. Check the export log.");
        }
    }

    fn export_single(&mut self, admin_id: UserId, format: ExportFormat) -> anyhow::Result<()> {
        let allowed = self.require_export_permission(admin_id);
        if self.check(allowed).is_none() {
            return Ok(());
        }

        let default = self.exports.destination(format).to_path_buf();
        let answer = self
            .console
            .input(&format!("Destination [{}]", default.display()))?;
        let destination = if answer.trim().is_empty() {
            default
        } else {
            PathBuf::from(answer.trim())
        };

        if self.exports.export_to(format, &self.store, &destination) {
            self.say(format!("✅ {} export saved to {}", format, destination.display()));
        } else {
            self.say(format!("❌ {} export to {} failed", format, destination.display()));
        }
        Ok(())
    }

    fn export_log(&mut self) {
        let limit = self.exports.config().log_display_limit;
        let mut lines = vec!["\n📋 Export Log".to_string(), "-".repeat(60)];
        let recent = self.exports.log().recent(limit);
        if recent.is_empty() {
            lines.push("No export operations logged yet.".to_string());
        }
        lines.extend(recent.iter().map(ToString::to_string));
        for line in lines {
            self.say(line);
        }
    }

    fn link_parent(&mut self) -> anyhow::Result<()> {
        let Some(parent_id) = self.ask::<UserId>("Parent ID")? else {
            return Ok(());
        };
        let Some(student_id) = self.ask::<UserId>("Student ID")? else {
            return Ok(());
        };

        let result = self.store.link_child(parent_id, student_id);
        match self.check(result) {
            Some(true) => self.say("✅ Child linked to parent!"),
            Some(false) => self.say("ℹ️  Child was already linked."),
            None => {}
        }
        Ok(())
    }

    fn add_lesson(&mut self) -> anyhow::Result<()> {
        let class_id = self.console.input("Class ID")?;
        let day = self.console.input("Day (e.g. Monday)")?;
        let time = self.console.input("Time (HH:MM)")?;
        let subject = self.console.input("Subject")?;
        let Some(teacher_id) = self.ask::<UserId>("Teacher ID")? else {
            return Ok(());
        };

        if class_id.trim().is_empty() || day.trim().is_empty() || time.trim().is_empty() {
            self.say("❌ Class, day and time are required!");
            return Ok(());
        }

        let schedule_id = self.store.add_schedule(&class_id, &day);
        let result = self.store.add_lesson(schedule_id, &time, &subject, teacher_id);
        if self.check(result).is_some() {
            self.say("✅ Lesson added to schedule!");
        }
        Ok(())
    }

    fn remove_lesson(&mut self) -> anyhow::Result<()> {
        let class_id = self.console.input("Class ID")?;
        let day = self.console.input("Day (e.g. Monday)")?;
        let time = self.console.input("Time (HH:MM)")?;

        let Some(schedule_id) = self.store.find_schedule(&class_id, &day) else {
            self.say(format!("❌ No schedule for {} on {}", class_id.trim(), day.trim()));
            return Ok(());
        };
        let result = self.store.remove_lesson(schedule_id, &time);
        if self.check(result).is_some() {
            self.say("✅ Lesson removed from schedule!");
        }
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

fn render_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    match report {
        Report::Users(stats) => push_user_stats(&mut lines, stats),
        Report::Assignments(assignments) => push_assignment_report(&mut lines, assignments),
        Report::Grades { analysis } => push_grade_analysis(&mut lines, analysis.as_ref()),
        Report::System {
            users,
            assignments,
            grades,
            notifications,
        } => {
            lines.push("\n📈 System Statistics".to_string());
            lines.push("=".repeat(40));
            push_user_stats(&mut lines, users);
            push_assignment_report(&mut lines, assignments);
            push_grade_analysis(&mut lines, grades.as_ref());
            lines.push(format!("\nTotal Notifications: {}", notifications));
        }
    }
    lines
}

fn push_user_stats(lines: &mut Vec<String>, stats: &eduplatform_store::UserStatistics) {
    lines.push("\n👥 User Statistics".to_string());
    lines.push(format!("Total Users: {}", stats.total));
    lines.push(format!("Students: {}", stats.students));
    lines.push(format!("Teachers: {}", stats.teachers));
    lines.push(format!("Parents: {}", stats.parents));
    lines.push(format!("Admins: {}", stats.admins));
}

fn push_assignment_report(lines: &mut Vec<String>, report: &eduplatform_store::AssignmentReport) {
    lines.push("\n📚 Assignment Reports".to_string());
    lines.push(format!("Total Assignments: {}", report.total_assignments));
    lines.push(format!("Total Submissions: {}", report.total_submissions));
    lines.push(format!("Total Graded: {}", report.total_graded));
    if let Some(rate) = report.completion_rate() {
        lines.push(format!("Completion Rate: {:.1}%", rate));
        lines.push(format!("Grading Rate: {:.1}%", report.grading_rate()));
    }
}

fn push_grade_analysis(lines: &mut Vec<String>, analysis: Option<&eduplatform_store::GradeAnalysis>) {
    match analysis {
        Some(a) => {
            lines.push("\n📊 Grade Analysis".to_string());
            lines.push(format!("Total Grades: {}", a.count));
            lines.push(format!("Average Grade: {:.2}", a.average));
            lines.push(format!("Highest Grade: {}", a.highest));
            lines.push(format!("Lowest Grade: {}", a.lowest));
        }
        None => lines.push("No grades recorded yet.".to_string()),
    }
}
