//! Interactive console session.
//!
//! [`Shell`] owns the store and export manager for the session, logs a user
//! in and routes them to their role menu. Operation failures are printed
//! and the menu continues; only console I/O errors end the session.

mod admin;
mod console;
mod parent;
mod student;
mod teacher;

pub use console::{Console, ScriptedConsole, TerminalConsole};

use chrono::{Local, NaiveDateTime};
use eduplatform_core::AppError;
use eduplatform_export::ExportManager;
use eduplatform_models::{NotificationId, ProfileUpdate, Role, UserId};
use eduplatform_store::DataStore;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;

const PROFILE_ITEMS: &[&str] = &["Edit profile", "Back"];
const NOTIFICATION_ITEMS: &[&str] = &["Mark as read", "Delete", "Back"];

pub struct Shell<C: Console> {
    store: DataStore,
    exports: ExportManager,
    console: C,
}

impl<C: Console> Shell<C> {
    pub fn new(store: DataStore, exports: ExportManager, console: C) -> Self {
        Self {
            store,
            exports,
            console,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn exports(&self) -> &ExportManager {
        &self.exports
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_parts(self) -> (DataStore, ExportManager, C) {
        (self.store, self.exports, self.console)
    }

    /// Login loop. Returns when the user picks Exit.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.say("🎓 EduPlatform - Educational Records Console");
        loop {
            match self.console.select("Authentication Required", &["Login", "Exit"])? {
                0 => {
                    if let Some(user_id) = self.login()? {
                        self.session(user_id)?;
                        info!(user_id = %user_id, "User logged out");
                        self.say("👋 Logged out successfully!");
                    }
                }
                _ => {
                    self.say("👋 Goodbye!");
                    return Ok(());
                }
            }
        }
    }

    fn login(&mut self) -> anyhow::Result<Option<UserId>> {
        let email = self.console.input("Email")?;
        let password = self.console.password("Password")?;

        match self.store.authenticate(&email, &password) {
            Ok(user) => {
                let line = format!("✅ Welcome, {} ({})", user.profile.full_name, user.role());
                let id = user.id();
                self.say(line);
                Ok(Some(id))
            }
            Err(e) => {
                self.fail(&e);
                Ok(None)
            }
        }
    }

    fn session(&mut self, user_id: UserId) -> anyhow::Result<()> {
        let role = self.store.user(user_id).map_err(AppError::into_inner)?.role();
        match role {
            Role::Admin => self.admin_menu(user_id),
            Role::Teacher => self.teacher_menu(user_id),
            Role::Student => self.student_menu(user_id),
            Role::Parent => self.parent_menu(user_id),
        }
    }

    pub(crate) fn say(&mut self, line: impl AsRef<str>) {
        self.console.say(line.as_ref());
    }

    pub(crate) fn fail(&mut self, error: &impl Display) {
        self.say(format!("❌ {}", error));
    }

    /// Prints the error of a failed operation and yields `None`.
    pub(crate) fn check<T>(&mut self, result: Result<T, AppError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.fail(&e);
                None
            }
        }
    }

    /// Reads and parses a value; prints an error and yields `None` on bad input.
    pub(crate) fn ask<T: FromStr>(&mut self, prompt: &str) -> anyhow::Result<Option<T>> {
        let raw = self.console.input(prompt)?;
        match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.say("❌ Invalid input!");
                Ok(None)
            }
        }
    }

    pub(crate) fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub(crate) fn profile_screen(&mut self, user_id: UserId) -> anyhow::Result<()> {
        let lines = match self.store.user(user_id) {
            Ok(user) => {
                let view = user.view_profile();
                vec![
                    "\n👤 Profile".to_string(),
                    format!("ID: {}", view.id),
                    format!("Name: {}", view.full_name),
                    format!("Email: {}", view.email),
                    format!("Role: {}", view.role),
                    format!("Created: {}", view.created_at.format("%Y-%m-%d %H:%M")),
                    format!("Phone: {}", blank_as_dash(&view.phone)),
                    format!("Address: {}", blank_as_dash(&view.address)),
                ]
            }
            Err(e) => vec![format!("❌ {}", e)],
        };
        for line in lines {
            self.say(line);
        }

        if self.console.select("Profile", PROFILE_ITEMS)? == 0 {
            let update = ProfileUpdate {
                full_name: non_empty(self.console.input("Full name (blank to keep)")?),
                phone: non_empty(self.console.input("Phone (blank to keep)")?),
                address: non_empty(self.console.input("Address (blank to keep)")?),
            };
            let result = self.store.update_profile(user_id, update);
            if self.check(result).is_some() {
                self.say("✅ Profile updated!");
            }
        }
        Ok(())
    }

    pub(crate) fn notifications_screen(&mut self, user_id: UserId) -> anyhow::Result<()> {
        let (lines, has_items) = match self.store.user(user_id) {
            Ok(user) => {
                let inbox = user.profile.notifications();
                let mut lines = vec![format!("\n🔔 Notifications ({} unread)", inbox.unread_count())];
                for n in user.profile.view_notifications() {
                    lines.push(format!(
                        "[{}] {}{} {} - {}",
                        n.id,
                        if n.is_high_priority() { "❗" } else { "" },
                        if n.is_read { "" } else { "🆕" },
                        n.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                        n.message
                    ));
                }
                if inbox.is_empty() {
                    lines.push("No notifications.".to_string());
                }
                (lines, !inbox.is_empty())
            }
            Err(e) => (vec![format!("❌ {}", e)], false),
        };
        for line in lines {
            self.say(line);
        }
        if !has_items {
            return Ok(());
        }

        match self.console.select("Notifications", NOTIFICATION_ITEMS)? {
            0 => {
                if let Some(id) = self.ask::<NotificationId>("Notification ID")? {
                    let done = self
                        .store
                        .user_mut(user_id)
                        .map(|u| u.profile.mark_notification_read(id));
                    self.report_notification_change(done, "marked as read");
                }
            }
            1 => {
                if let Some(id) = self.ask::<NotificationId>("Notification ID")? {
                    let done = self
                        .store
                        .user_mut(user_id)
                        .map(|u| u.profile.delete_notification(id));
                    self.report_notification_change(done, "deleted");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn report_notification_change(&mut self, result: Result<bool, AppError>, action: &str) {
        match self.check(result) {
            Some(true) => self.say(format!("✅ Notification {}", action)),
            Some(false) => self.say("❌ Notification not found!"),
            None => {}
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn blank_as_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub(crate) fn format_scores(scores: &[eduplatform_models::Score]) -> String {
    let values: Vec<String> = scores.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::seed_demo_accounts;

    fn shell(answers: &[&str]) -> Shell<ScriptedConsole> {
        let mut store = DataStore::new();
        seed_demo_accounts(&mut store).unwrap();
        Shell::new(
            store,
            ExportManager::default(),
            ScriptedConsole::new(answers.iter().copied()),
        )
    }

    #[test]
    fn test_wrong_password_stays_logged_out() {
        let mut shell = shell(&["Login", "alice@edu.com", "wrong", "Exit"]);
        shell.run().unwrap();
        let output = shell.console().output();
        assert!(output.contains("❌ Invalid credentials"));
        assert!(output.ends_with("👋 Goodbye!"));
    }

    #[test]
    fn test_profile_edit() {
        let mut shell = shell(&[
            "Login",
            "alice@edu.com",
            "student123",
            "Profile",
            "Edit profile",
            "",
            "+998 90 000 00 00",
            "",
            "Logout",
            "Exit",
        ]);
        shell.run().unwrap();

        let alice = shell.store().find_user_by_email("alice@edu.com").unwrap();
        assert_eq!(alice.profile.phone, "+998 90 000 00 00");
        assert_eq!(alice.profile.full_name, "Alice Adam");
        assert!(shell.console().output().contains("✅ Profile updated!"));
    }

    #[test]
    fn test_script_exhaustion_is_an_error() {
        let mut shell = shell(&["Login", "alice@edu.com"]);
        assert!(shell.run().is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" x ".to_string()), Some("x".to_string()));
    }
}
