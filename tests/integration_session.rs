use eduplatform_cli::seeder::seed_demo_accounts;
use eduplatform_cli::shell::{ScriptedConsole, Shell};
use eduplatform_export::ExportManager;
use eduplatform_models::{AssignmentId, SubmissionState, UserId};
use eduplatform_store::DataStore;

fn session(answers: &[&str]) -> Shell<ScriptedConsole> {
    let mut store = DataStore::new();
    seed_demo_accounts(&mut store).unwrap();
    Shell::new(store, ExportManager::default(), ScriptedConsole::new(answers.iter().copied()))
}

#[test]
fn test_submit_grade_and_read_notification_across_logins() {
    let mut shell = session(&[
        // Student hands in the demo assignment
        "Login",
        "alice@edu.com",
        "student123",
        "Submit assignment",
        "1",
        "def solve(): return 42",
        "Logout",
        // Teacher grades it
        "Login",
        "john@edu.com",
        "teacher123",
        "Grade assignment",
        "1",
        "3",
        "5",
        "",
        "Logout",
        // Student reads and clears the notification
        "Login",
        "alice@edu.com",
        "student123",
        "Notifications",
        "Mark as read",
        "1",
        "Logout",
        "Exit",
    ]);
    shell.run().unwrap();

    let output = shell.console().output();
    assert!(output.contains("✅ Assignment submitted!"));
    assert!(output.contains("✅ Grade 5 recorded!"));
    assert!(output.contains("Assignment 'Python task' graded: 5"));
    assert!(output.contains("✅ Notification marked as read"));

    let (store, _, console) = shell.into_parts();
    assert_eq!(console.remaining(), 0);
    let alice = store.user(UserId::new(3)).unwrap();
    assert_eq!(alice.profile.notifications().unread_count(), 0);
    assert_eq!(
        alice.as_student().unwrap().status_of(AssignmentId::new(1)),
        Some(SubmissionState::Graded)
    );
}

#[test]
fn test_parent_sees_grade_alert() {
    let mut shell = session(&[
        "Login",
        "john@edu.com",
        "teacher123",
        "Grade assignment",
        "1",
        "3",
        "2",
        "Needs work",
        "Logout",
        "Login",
        "bob@edu.com",
        "parent123",
        "Notifications",
        "Back",
        "Logout",
        "Exit",
    ]);
    shell.run().unwrap();

    let output = shell.console().output();
    assert!(output.contains("Notifications (1 unread)"));
    assert!(output.contains("Child 3: New grade 2 in CS"));
}
