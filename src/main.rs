// 🎓 Course Registrar - interactive text menu
// Thin presentation layer: reads menu choices from stdin, drives the
// registrar, prints outcomes. All rules live in the library.

use anyhow::Result;
use std::env;
use std::io::{self, Write};

use course_registrar::{CsvStorage, DropOutcome, EnrollOutcome, Registrar};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Data files live in the current directory, next to the binary's
    // invocation point: students.csv, courses.csv, enrollments.csv
    let mut registrar = Registrar::new(Box::new(CsvStorage::new(".")));

    if let Err(e) = registrar.load_all() {
        eprintln!("⚠️  Failed to load existing data: {}", e);
    }

    if args.iter().any(|a| a.eq_ignore_ascii_case("--demo")) {
        registrar.seed_demo_data()?;
        println!("✓ Demo data seeded");
    }

    println!("=== UCA Course Registration ===");
    menu_loop(&mut registrar)?;

    // Flush everything on exit; per-mutation saves make this a formality
    if let Err(e) = registrar.save_all() {
        eprintln!("⚠️  Failed to save data: {}", e);
    }
    println!("Goodbye!");

    Ok(())
}

fn menu_loop(registrar: &mut Registrar) -> Result<()> {
    loop {
        println!("\nMenu:");
        println!("1) Add student");
        println!("2) Add course");
        println!("3) Enroll student in course");
        println!("4) Drop student from course");
        println!("5) List students");
        println!("6) List courses");
        println!("0) Exit");

        let Some(choice) = prompt("Choose: ")? else {
            return Ok(()); // stdin closed
        };
        match choice.as_str() {
            "1" => add_student_ui(registrar)?,
            "2" => add_course_ui(registrar)?,
            "3" => enroll_ui(registrar)?,
            "4" => drop_ui(registrar)?,
            "5" => list_students(registrar),
            "6" => list_courses(registrar),
            "0" => return Ok(()),
            _ => println!("Invalid"),
        }
    }
}

/// Print a prompt and read one trimmed line. `None` on EOF.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_student_ui(registrar: &mut Registrar) -> Result<()> {
    let Some(id) = prompt("Banner ID: ")? else { return Ok(()) };
    let Some(name) = prompt("Name: ")? else { return Ok(()) };
    let Some(email) = prompt("Email: ")? else { return Ok(()) };

    match registrar.add_student(&id, &name, &email) {
        Ok(()) => println!("Student added successfully."),
        Err(e) => println!("Error: {}", e.message),
    }
    Ok(())
}

fn add_course_ui(registrar: &mut Registrar) -> Result<()> {
    let Some(code) = prompt("Course Code: ")? else { return Ok(()) };
    let Some(title) = prompt("Title: ")? else { return Ok(()) };
    let Some(capacity_str) = prompt("Capacity: ")? else { return Ok(()) };

    let Ok(capacity) = capacity_str.parse::<u32>() else {
        println!("Error: Capacity must be a number");
        return Ok(());
    };
    match registrar.add_course(&code, &title, capacity) {
        Ok(()) => println!("Course added successfully."),
        Err(e) => println!("Error: {}", e.message),
    }
    Ok(())
}

fn enroll_ui(registrar: &mut Registrar) -> Result<()> {
    let Some(sid) = prompt("Student ID: ")? else { return Ok(()) };
    let Some(code) = prompt("Course Code: ")? else { return Ok(()) };

    match registrar.enroll_student(&sid, &code) {
        EnrollOutcome::BlankInput(field) => println!("Error: {}", field.message()),
        EnrollOutcome::NoSuchCourse => println!("No such course"),
        EnrollOutcome::AlreadyEnrolled => println!("Already enrolled"),
        EnrollOutcome::AlreadyWaitlisted => println!("Already waitlisted"),
        EnrollOutcome::Waitlisted => println!("Course full. Added to WAITLIST."),
        EnrollOutcome::Enrolled => println!("Enrolled."),
    }
    Ok(())
}

fn drop_ui(registrar: &mut Registrar) -> Result<()> {
    let Some(sid) = prompt("Student ID: ")? else { return Ok(()) };
    let Some(code) = prompt("Course Code: ")? else { return Ok(()) };

    match registrar.drop_student(&sid, &code) {
        DropOutcome::BlankInput(field) => println!("Error: {}", field.message()),
        DropOutcome::NoSuchCourse => println!("No such course"),
        DropOutcome::Promoted(promoted) => println!("Promoted {} from waitlist.", promoted),
        DropOutcome::Dropped => println!("Dropped."),
        DropOutcome::WaitlistRemoved => println!("Removed from waitlist."),
        DropOutcome::NotEnrolled => println!("Not enrolled or waitlisted."),
    }
    Ok(())
}

fn list_students(registrar: &Registrar) {
    println!("Students:");
    for student in registrar.list_students() {
        println!(" - {}", student.summary());
    }
}

fn list_courses(registrar: &Registrar) {
    println!("Courses:");
    for course in registrar.list_courses() {
        println!(" - {}", course.summary());
    }
}
