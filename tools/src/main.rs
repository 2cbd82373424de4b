//! desk-runner: headless complaint desk harness.
//!
//! Stands in for the excluded view layer: wires the core workspace to an
//! in-memory directory and either prints a one-shot summary or serves a
//! line-delimited JSON command loop on stdin/stdout.
//!
//! Usage:
//!   desk-runner --data fixtures.json
//!   desk-runner --ipc-mode

use anyhow::Result;
use nexus_core::{
    directory::{ComplaintSink, DirectorySource},
    error::{DeskError, DeskResult},
    intake::{self, NewComplaint},
    model::{Complaint, Employee},
    session::{Role, Session},
    workspace::Workspace,
};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Refresh,
    OpenDraft { complaint_id: String },
    SetStatus { status: String },
    CyclePriority,
    AssignTechnician { employee_id: String },
    Commit,
    Discard,
    Submit { title: String, category: String, description: String },
    Quit,
}

#[derive(serde::Deserialize)]
struct FixtureFile {
    complaints: Vec<Complaint>,
    employees: Vec<Employee>,
}

/// The collaborator side of the wire, in memory: serves snapshots and
/// applies writes the way the real directory service would, so a commit
/// followed by a refresh round-trips through it.
struct InMemoryDirectory {
    complaints: Vec<Complaint>,
    employees: Vec<Employee>,
}

impl DirectorySource for InMemoryDirectory {
    fn fetch_complaints(&mut self, _session: &Session) -> DeskResult<Vec<Complaint>> {
        Ok(self.complaints.clone())
    }

    fn fetch_employees(&mut self, _session: &Session) -> DeskResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }
}

impl ComplaintSink for InMemoryDirectory {
    fn persist(&mut self, _session: &Session, complaint: &Complaint) -> DeskResult<()> {
        match self
            .complaints
            .iter_mut()
            .find(|c| c.complaint_id == complaint.complaint_id)
        {
            Some(existing) => {
                *existing = complaint.clone();
                Ok(())
            }
            None => Err(DeskError::Persistence {
                reason: format!("no such complaint: {}", complaint.complaint_id),
            }),
        }
    }

    fn submit(&mut self, _session: &Session, complaint: &Complaint) -> DeskResult<()> {
        self.complaints.push(complaint.clone());
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data = args
        .windows(2)
        .find(|w| w[0] == "--data")
        .map(|w| w[1].as_str());
    let user = args
        .windows(2)
        .find(|w| w[0] == "--user")
        .map(|w| w[1].as_str())
        .unwrap_or("admin-local");

    let mut directory = match data {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let fixture: FixtureFile = serde_json::from_str(&raw)?;
            InMemoryDirectory {
                complaints: fixture.complaints,
                employees: fixture.employees,
            }
        }
        None => sample_directory(),
    };

    let session = Session::new(user, Role::Admin, "local-token");
    let mut desk = Workspace::open(session.clone())?;
    desk.refresh(&mut directory)?;

    if ipc_mode {
        run_ipc_loop(&mut desk, &session, &mut directory)?;
    } else {
        print_summary(&mut desk);
    }

    Ok(())
}

fn run_ipc_loop(
    desk: &mut Workspace,
    session: &Session,
    directory: &mut InMemoryDirectory,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        match apply_command(desk, session, directory, cmd) {
            Ok(()) => writeln!(stdout, "{}", desk.export_snapshot()?)?,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn apply_command(
    desk: &mut Workspace,
    session: &Session,
    directory: &mut InMemoryDirectory,
    cmd: IpcCommand,
) -> DeskResult<()> {
    match cmd {
        IpcCommand::GetState | IpcCommand::Quit => {}
        IpcCommand::Refresh => desk.refresh(directory)?,
        IpcCommand::OpenDraft { complaint_id } => {
            desk.open_draft(&complaint_id)?;
        }
        IpcCommand::SetStatus { status } => {
            desk.set_status(&status)?;
        }
        IpcCommand::CyclePriority => {
            desk.cycle_priority()?;
        }
        IpcCommand::AssignTechnician { employee_id } => {
            desk.assign_technician(&employee_id)?;
        }
        IpcCommand::Commit => {
            let events = desk.commit_draft(directory)?;
            for event in &events {
                log::info!("desk: {event:?}");
            }
        }
        IpcCommand::Discard => {
            desk.discard_draft()?;
        }
        IpcCommand::Submit {
            title,
            category,
            description,
        } => {
            let form = NewComplaint {
                title,
                category,
                description,
            };
            let filed = intake::file_complaint(form, session, directory)?;
            log::info!("desk: filed {}", filed.complaint_id);
        }
    }
    Ok(())
}

fn print_summary(desk: &mut Workspace) {
    let board = desk.queue_board();
    println!("Nexus complaint desk — summary");
    println!("  pending:     {}", board.counts.pending);
    println!("  in-progress: {}", board.counts.in_progress);
    println!("  resolved:    {}", board.counts.resolved);
    println!("  total:       {}", board.counts.total);
    println!();

    let analytics = desk.analytics();
    println!("  resolution rate: {}%", analytics.stats.resolution_rate_pct);
    println!("  high priority:   {}", analytics.stats.high_priority);
    println!("  active staff:    {}", analytics.stats.active_staff);
    println!();

    println!("  status distribution:");
    for slice in &analytics.status_distribution {
        println!("    {:<20} {}", slice.status.label(), slice.count);
    }
    println!("  categories:");
    for row in &analytics.category_distribution {
        println!("    {:<20} {}", row.name, row.count);
    }
    println!("  technician load:");
    for row in &analytics.technician_workload {
        println!("    {:<20} {}", row.name, row.active);
    }
}

/// Small built-in dataset for running without a fixture file.
fn sample_directory() -> InMemoryDirectory {
    let employees = vec![
        Employee {
            employee_id: "E1".into(),
            full_name: "Ana Ortiz".into(),
            role: "Field Service".into(),
        },
        Employee {
            employee_id: "E2".into(),
            full_name: "Marcus Webb".into(),
            role: "Network Ops".into(),
        },
    ];

    let complaint = |id: &str, title: &str, category: &str, status: &str| Complaint {
        complaint_id: id.into(),
        title: title.into(),
        description: String::new(),
        category: Some(category.into()),
        status: status.into(),
        priority: None,
        technician: None,
        date: "2025-11-02".into(),
    };

    let mut complaints = vec![
        complaint("C-1001", "Router keeps dropping", "Technical", "pending"),
        complaint("C-1002", "Double charge on invoice", "Billing", "pending"),
        complaint("C-1003", "Broken door on floor 3", "Facility", "in-progress"),
        complaint("C-1004", "Email bounce-backs", "Technical", "resolved"),
    ];
    complaints[2].technician = Some("E1".into());
    complaints[2].priority = Some("high".into());

    InMemoryDirectory {
        complaints,
        employees,
    }
}
