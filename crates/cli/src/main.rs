// seatplan - classroom seating plans from the command line
//
// Every invocation loads the classroom file, runs one command and saves
// the file again when the command changed something.

mod exit_codes;
mod render;
mod resolve;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use seatplan_config::Settings;
use seatplan_engine::assign::Placement;
use seatplan_engine::{
    Classroom, ClassroomError, Command, DuplicatePolicy, Gender, Outcome, SeatId, Student, StudentFields,
    StudentFilter, StudentId,
};
use seatplan_io::export::{ChartFormat, SeatingChart};
use seatplan_io::{export, layouts, native, roster_import, template};

use exit_codes::{engine_exit_code, EXIT_IO, EXIT_NOT_FOUND, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(about = "Classroom seating plans (headless)")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Classroom file (defaults to the storage.dataFile setting)
    // Own id so subcommand positionals named `file` don't overwrite it
    #[arg(long = "file", id = "classroom_file", value_name = "PATH", global = true, env = "SEATPLAN_FILE")]
    file: Option<PathBuf>,

    /// Settings file (defaults to <config dir>/seatplan/settings.json)
    #[arg(long, value_name = "PATH", global = true, env = "SEATPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty classroom file
    Init {
        /// Number of rows (defaults to layout.defaultRows)
        #[arg(long)]
        rows: Option<usize>,

        /// Number of columns (defaults to layout.defaultCols)
        #[arg(long)]
        cols: Option<usize>,

        /// Replace an existing classroom file
        #[arg(long)]
        force: bool,
    },

    /// Add, edit, remove or list students
    #[command(subcommand)]
    Student(StudentCommands),

    /// Import students from a spreadsheet (csv, tsv, xlsx, xls, ods)
    #[command(after_help = "\
Recognised headers: 姓名/Name, 学号/Id, 性别/Gender, 视力情况/Vision, 备注/Notes.
Run `seatplan template roster.xlsx` for a starting file.")]
    Import {
        file: PathBuf,

        /// Update students whose name already exists
        #[arg(long, conflicts_with = "skip")]
        overwrite: bool,

        /// Leave students whose name already exists untouched
        #[arg(long)]
        skip: bool,

        /// Report what would happen without saving
        #[arg(long)]
        dry_run: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an import template (.xlsx or .csv)
    Template { file: PathBuf },

    /// Seat a student (moving or swapping as needed)
    #[command(after_help = "\
Seats are addressed as row-col, 0-based, front row first.
Examples:
  seatplan assign 张三 0-2
  seatplan assign 001 3-1 --from 0-2")]
    Assign {
        /// Student id, name or student number
        student: String,

        /// Target seat (row-col)
        seat: String,

        /// Seat the student is dragged from
        #[arg(long)]
        from: Option<String>,
    },

    /// Empty a seat
    Unseat { seat: String },

    /// Empty every seat
    Clear,

    /// Random arrangement; front-seat students go to the front third first
    Shuffle {
        /// Seed for a reproducible arrangement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Change the grid size (clears all seats)
    Resize { rows: usize, cols: usize },

    /// Step back one seating change
    Undo,

    /// Step forward one seating change
    Redo,

    /// Print the seating chart
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Print seating statistics
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Export the seating chart
    Export {
        file: PathBuf,

        /// Output format (defaults to the file extension)
        #[arg(long)]
        format: Option<ChartFormatArg>,
    },

    /// Free-text seating notes
    #[command(subcommand)]
    Constraint(ConstraintCommands),

    /// Named seating arrangements
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// Show or hide seat coordinates on the chart
    Coords { state: Toggle },

    /// Delete all students, constraints, seats and history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum StudentCommands {
    /// Add a student
    Add {
        name: String,

        /// Student number
        #[arg(long)]
        number: Option<String>,

        #[arg(long, value_enum)]
        gender: Option<GenderArg>,

        /// Needs a seat in the front third
        #[arg(long)]
        front: bool,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a student; omitted options keep their value
    Edit {
        /// Student id, name or student number
        student: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long, value_enum)]
        gender: Option<GenderArg>,

        #[arg(long)]
        front: Option<bool>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a student (frees their seat)
    Remove { student: String },

    /// List students
    List {
        /// all, seated or unseated
        #[arg(long, default_value = "all")]
        filter: StudentFilter,

        /// Case-insensitive match on name and details
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConstraintCommands {
    /// Add a constraint
    Add { text: String },

    /// Remove a constraint by number or id
    Remove { constraint: String },

    /// Switch a constraint on or off
    Toggle { constraint: String },

    /// List constraints
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum LayoutCommands {
    /// Save the current arrangement under a name
    Save { name: String },

    /// List saved arrangements
    List {
        #[arg(long)]
        json: bool,
    },

    /// Restore a saved arrangement (undoable)
    Load { name: String },

    /// Delete a saved arrangement
    Delete { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    #[value(alias = "m")]
    Male,
    #[value(alias = "f")]
    Female,
    #[value(alias = "none")]
    Unspecified,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Unspecified => Gender::Unspecified,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartFormatArg {
    Csv,
    Json,
}

impl From<ChartFormatArg> for ChartFormat {
    fn from(arg: ChartFormatArg) -> Self {
        match arg {
            ChartFormatArg::Csv => ChartFormat::Csv,
            ChartFormatArg::Json => ChartFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("SEATPLAN_COMMIT"), ")",
        "\nengine:  seatplan-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("SEATPLAN_TARGET"), " (", env!("SEATPLAN_PROFILE"), ")",
        "\nformat:  ", "seatplan native v1 (sqlite)",
    )
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        // No subcommand = show help
        eprintln!("Usage: seatplan <command> [options]");
        eprintln!("       seatplan --help for more information");
        return ExitCode::from(EXIT_SUCCESS);
    };

    let settings = load_settings(cli.config.as_deref());
    let path = cli.file.unwrap_or_else(|| settings.data_file());

    let result = match command {
        Commands::Init { rows, cols, force } => cmd_init(&path, &settings, rows, cols, force),
        Commands::Template { file } => cmd_template(&file),
        command => Room::open(path, settings).and_then(|mut room| dispatch(&mut room, command)),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn load_settings(config: Option<&Path>) -> Settings {
    match config {
        Some(path) if path.exists() => Settings::load_from(path),
        Some(path) => {
            log::debug!("{} not found, using default settings", path.display());
            Settings::default()
        }
        None => Settings::load(),
    }
}

fn dispatch(room: &mut Room, command: Commands) -> Result<(), CliError> {
    match command {
        // Handled before the classroom is opened
        Commands::Init { .. } | Commands::Template { .. } => Ok(()),
        Commands::Student(command) => cmd_student(room, command),
        Commands::Import { file, overwrite, skip, dry_run, json } => {
            cmd_import(room, &file, overwrite, skip, dry_run, json)
        }
        Commands::Assign { student, seat, from } => cmd_assign(room, &student, &seat, from.as_deref()),
        Commands::Unseat { seat } => cmd_unseat(room, &seat),
        Commands::Clear => {
            if let Outcome::Cleared { seats } = room.run(Command::ClearSeats)? {
                println!("Cleared {} seats", seats);
            }
            Ok(())
        }
        Commands::Shuffle { seed } => cmd_shuffle(room, seed),
        Commands::Resize { rows, cols } => {
            room.run(Command::Resize { rows, cols })?;
            println!("Layout is now {}x{}; all seats cleared", rows, cols);
            Ok(())
        }
        Commands::Undo => {
            match room.run(Command::Undo)? {
                Outcome::Undone => println!("Undone"),
                _ => println!("Nothing to undo"),
            }
            Ok(())
        }
        Commands::Redo => {
            match room.run(Command::Redo)? {
                Outcome::Redone => println!("Redone"),
                _ => println!("Nothing to redo"),
            }
            Ok(())
        }
        Commands::Show { json } => {
            if json {
                print_json(&SeatingChart::from_classroom(&room.classroom))
            } else {
                print!("{}", render::chart(&room.classroom));
                Ok(())
            }
        }
        Commands::Stats { json } => {
            let stats = room.classroom.stats();
            if json {
                print_json(&stats)
            } else {
                println!("{}", stats);
                Ok(())
            }
        }
        Commands::Export { file, format } => {
            let format = format.map(ChartFormat::from).unwrap_or_else(|| ChartFormat::from_path(&file));
            export::export_chart(&room.classroom, &file, format).map_err(CliError::io)?;
            println!("Exported chart to {}", file.display());
            Ok(())
        }
        Commands::Constraint(command) => cmd_constraint(room, command),
        Commands::Layout(command) => cmd_layout(room, command),
        Commands::Coords { state } => {
            let show = matches!(state, Toggle::On);
            room.run(Command::SetShowCoordinates { show })?;
            println!("Coordinates {}", if show { "shown" } else { "hidden" });
            Ok(())
        }
        Commands::Reset { yes } => {
            if !yes {
                return Err(CliError::args("reset deletes every student, constraint and seat assignment")
                    .with_hint("pass --yes to confirm"));
            }
            room.run(Command::Reset)?;
            println!("Classroom reset");
            Ok(())
        }
    }
}

// ============================================================================
// Room: the classroom file plus its in-memory state
// ============================================================================

struct Room {
    path: PathBuf,
    classroom: Classroom,
    /// `import.overwriteExisting`, used when neither --overwrite nor --skip is given
    overwrite_default: bool,
}

impl Room {
    /// Load the classroom file, or start a fresh classroom from settings
    /// when the file does not exist yet.
    fn open(path: PathBuf, settings: Settings) -> Result<Self, CliError> {
        let classroom = if path.exists() {
            let bundle = native::load(&path)
                .map_err(|e| CliError::parse(e).with_hint(format!("classroom file: {}", path.display())))?;
            Classroom::from_bundle(bundle, settings.max_history)?
        } else {
            log::debug!("{} does not exist, starting a fresh classroom", path.display());
            fresh_classroom(&settings, settings.default_rows, settings.default_cols)?
        };
        Ok(Self {
            path,
            classroom,
            overwrite_default: settings.overwrite_existing,
        })
    }

    fn save(&self) -> Result<(), CliError> {
        native::save(&self.classroom.to_bundle(), &self.path).map_err(CliError::io)
    }

    /// Apply one command and persist the result if it changed anything.
    fn run(&mut self, command: Command) -> Result<Outcome, CliError> {
        let outcome = self.classroom.apply(command)?;
        if outcome.is_change() {
            self.save()?;
        }
        Ok(outcome)
    }

    fn name_of(&self, id: StudentId) -> String {
        self.classroom
            .student(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn label(&self, seat: SeatId) -> String {
        self.classroom.layout().label(seat)
    }
}

fn fresh_classroom(settings: &Settings, rows: usize, cols: usize) -> Result<Classroom, CliError> {
    Ok(Classroom::new(rows, cols)?
        .with_history_limit(settings.max_history)
        .with_show_coordinates(settings.show_coordinates))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::io(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// init / template
// ============================================================================

fn cmd_init(
    path: &Path,
    settings: &Settings,
    rows: Option<usize>,
    cols: Option<usize>,
    force: bool,
) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("pass --force to start over"));
    }

    let rows = rows.unwrap_or(settings.default_rows);
    let cols = cols.unwrap_or(settings.default_cols);
    let classroom = fresh_classroom(settings, rows, cols)?;
    native::save(&classroom.to_bundle(), path).map_err(CliError::io)?;
    println!("Created {} ({}x{})", path.display(), rows, cols);
    Ok(())
}

fn cmd_template(file: &Path) -> Result<(), CliError> {
    template::write_template(file).map_err(CliError::io)?;
    println!("Wrote template {}", file.display());
    Ok(())
}

// ============================================================================
// student
// ============================================================================

fn cmd_student(room: &mut Room, command: StudentCommands) -> Result<(), CliError> {
    match command {
        StudentCommands::Add { name, number, gender, front, notes } => {
            let fields = StudentFields {
                external_id: number,
                notes: notes.unwrap_or_default(),
                ..StudentFields::named(name)
            }
            .with_gender(gender.map(Gender::from).unwrap_or_default())
            .with_front_seat(front);
            if let Outcome::StudentAdded { id } = room.run(Command::AddStudent { fields })? {
                println!("Added {} ({})", room.name_of(id), id);
            }
            Ok(())
        }
        StudentCommands::Edit { student, name, number, gender, front, notes } => {
            let id = resolve::student(&room.classroom, &student)?;
            let Some(current) = room.classroom.student(id) else {
                return Err(CliError::not_found(format!("no student '{}'", student)));
            };
            let mut fields = current.fields();
            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(number) = number {
                fields.external_id = Some(number);
            }
            if let Some(gender) = gender {
                fields.gender = gender.into();
            }
            if let Some(front) = front {
                fields.needs_front_seat = front;
            }
            if let Some(notes) = notes {
                fields.notes = notes;
            }
            room.run(Command::UpdateStudent { id, fields })?;
            println!("Updated {}", room.name_of(id));
            Ok(())
        }
        StudentCommands::Remove { student } => {
            let id = resolve::student(&room.classroom, &student)?;
            let name = room.name_of(id);
            room.run(Command::RemoveStudent { id })?;
            println!("Removed {}", name);
            Ok(())
        }
        StudentCommands::List { filter, search, json } => {
            let students = room.classroom.students_filtered(filter, &search);
            if json {
                let rows: Vec<serde_json::Value> =
                    students.iter().map(|s| student_json(&room.classroom, s)).collect();
                return print_json(&rows);
            }
            if students.is_empty() {
                println!("No students");
            }
            for student in students {
                println!("{}", render::student_line(&room.classroom, student));
            }
            Ok(())
        }
    }
}

fn student_json(classroom: &Classroom, student: &Student) -> serde_json::Value {
    let seat = classroom.seat_of(student.id);
    json!({
        "id": student.id,
        "name": student.name,
        "externalId": student.external_id,
        "gender": student.gender,
        "needsFrontSeat": student.needs_front_seat,
        "notes": student.notes,
        "seat": seat.map(|s| s.to_string()),
        "label": seat.map(|s| classroom.layout().label(s)),
    })
}

// ============================================================================
// import
// ============================================================================

fn cmd_import(
    room: &mut Room,
    file: &Path,
    overwrite: bool,
    skip: bool,
    dry_run: bool,
    json: bool,
) -> Result<(), CliError> {
    if !file.exists() {
        return Err(CliError::io(format!("{}: no such file", file.display())));
    }
    let parsed = roster_import::parse_file(file).map_err(CliError::parse)?;

    let policy = if overwrite {
        DuplicatePolicy::Overwrite
    } else if skip {
        DuplicatePolicy::Skip
    } else {
        DuplicatePolicy::from_overwrite(room.overwrite_default)
    };

    let command = Command::Import { rows: parsed.accepted.clone(), policy };
    let outcome = if dry_run {
        room.classroom.clone().apply(command)?
    } else {
        room.run(command)?
    };
    let Outcome::Imported { summary } = outcome else {
        return Err(CliError::args("import produced no summary"));
    };

    if json {
        return print_json(&json!({
            "dryRun": dry_run,
            "summary": summary,
            "rejected": parsed.rejected,
        }));
    }

    for rejected in &parsed.rejected {
        eprintln!("warning: row {}: {}", rejected.row, rejected.reason);
    }
    println!(
        "{}{} created, {} updated, {} skipped, {} invalid, {} rows rejected",
        if dry_run { "(dry run) " } else { "" },
        summary.created,
        summary.updated,
        summary.skipped,
        summary.invalid,
        parsed.rejected.len()
    );
    Ok(())
}

// ============================================================================
// seating
// ============================================================================

fn cmd_assign(room: &mut Room, student: &str, seat: &str, from: Option<&str>) -> Result<(), CliError> {
    let student = resolve::student(&room.classroom, student)?;
    let target = resolve::seat(&room.classroom, seat)?;
    let source = from
        .map(|s| s.parse().map_err(CliError::args))
        .transpose()?;

    let name = room.name_of(student);
    let outcome = room.run(Command::Assign { student, target, source })?;
    let Outcome::Assigned { placement } = outcome else {
        println!("Nothing changed");
        return Ok(());
    };

    let to = room.label(target);
    match placement {
        Placement::Unchanged => println!("{} already sits at {}", name, to),
        Placement::Placed => println!("{} -> {}", name, to),
        Placement::Displaced { displaced } => {
            println!("{} -> {} ({} is now unseated)", name, to, room.name_of(displaced))
        }
        Placement::Moved { from } => println!("{} {} -> {}", name, room.label(from), to),
        Placement::Swapped { from, displaced } => println!(
            "{} {} -> {}, {} {} -> {}",
            name,
            room.label(from),
            to,
            room.name_of(displaced),
            to,
            room.label(from)
        ),
    }
    Ok(())
}

fn cmd_unseat(room: &mut Room, seat: &str) -> Result<(), CliError> {
    let seat = resolve::seat(&room.classroom, seat)?;
    match room.run(Command::Unseat { seat })? {
        Outcome::Unseated { student, .. } => println!("{} left {}", room.name_of(student), room.label(seat)),
        _ => println!("Seat {} is already empty", room.label(seat)),
    }
    Ok(())
}

fn cmd_shuffle(room: &mut Room, seed: Option<u64>) -> Result<(), CliError> {
    let outcome = room.run(Command::Randomize { seed })?;
    if let Outcome::Arranged { summary } = outcome {
        println!(
            "Seated {} students ({} in the front rows)",
            summary.seated, summary.front_placed
        );
        if summary.front_overflow > 0 {
            eprintln!(
                "warning: {} front-seat students did not fit in the front rows",
                summary.front_overflow
            );
        }
        if summary.unseated > 0 {
            eprintln!("warning: {} students have no seat; the layout is full", summary.unseated);
        }
    }
    Ok(())
}

// ============================================================================
// constraint
// ============================================================================

fn cmd_constraint(room: &mut Room, command: ConstraintCommands) -> Result<(), CliError> {
    match command {
        ConstraintCommands::Add { text } => {
            if let Outcome::ConstraintAdded { id } = room.run(Command::AddConstraint { text })? {
                println!("Added constraint {}", id);
            }
            Ok(())
        }
        ConstraintCommands::Remove { constraint } => {
            let id = resolve::constraint(&room.classroom, &constraint)?;
            room.run(Command::RemoveConstraint { id })?;
            println!("Removed constraint {}", id);
            Ok(())
        }
        ConstraintCommands::Toggle { constraint } => {
            let id = resolve::constraint(&room.classroom, &constraint)?;
            let active = room
                .classroom
                .constraints()
                .iter()
                .find(|c| c.id == id)
                .map(|c| !c.active)
                .unwrap_or(true);
            room.run(Command::SetConstraintActive { id, active })?;
            println!("Constraint {} is {}", id, if active { "on" } else { "off" });
            Ok(())
        }
        ConstraintCommands::List { json } => {
            let constraints = room.classroom.constraints();
            if json {
                return print_json(&constraints);
            }
            if constraints.is_empty() {
                println!("No constraints");
            }
            for (index, constraint) in constraints.iter().enumerate() {
                println!("{}", render::constraint_line(index, constraint));
            }
            Ok(())
        }
    }
}

// ============================================================================
// layout
// ============================================================================

fn cmd_layout(room: &mut Room, command: LayoutCommands) -> Result<(), CliError> {
    match command {
        LayoutCommands::Save { name } => {
            // The layouts table lives in the classroom file; create it first
            if !room.path.exists() {
                room.save()?;
            }
            let saved = layouts::save_named_layout(&room.path, &name, &room.classroom).map_err(CliError::io)?;
            println!("Saved layout '{}' ({} seats occupied)", name.trim(), saved.occupied_count());
            Ok(())
        }
        LayoutCommands::List { json } => {
            let saved = if room.path.exists() {
                layouts::list_named_layouts(&room.path).map_err(CliError::io)?
            } else {
                Vec::new()
            };
            if json {
                return print_json(&saved);
            }
            if saved.is_empty() {
                println!("No saved layouts");
            }
            for info in saved {
                println!("{}\t{}", info.name, info.saved_at.format("%Y-%m-%d %H:%M"));
            }
            Ok(())
        }
        LayoutCommands::Load { name } => {
            let stored = if room.path.exists() {
                layouts::load_named_layout(&room.path, &name).map_err(CliError::io)?
            } else {
                None
            };
            let Some(stored) = stored else {
                return Err(CliError::not_found(format!("no layout named '{}'", name.trim()))
                    .with_hint("see `seatplan layout list`"));
            };
            room.run(Command::ApplyLayout {
                rows: stored.rows,
                cols: stored.cols,
                seats: stored.seats,
            })?;
            println!(
                "Loaded layout '{}' ({}x{}, {} seats occupied)",
                name.trim(),
                stored.rows,
                stored.cols,
                room.classroom.layout().occupied_count()
            );
            Ok(())
        }
        LayoutCommands::Delete { name } => {
            let removed = room.path.exists()
                && layouts::delete_named_layout(&room.path, &name).map_err(CliError::io)?;
            if !removed {
                return Err(CliError::not_found(format!("no layout named '{}'", name.trim())));
            }
            println!("Deleted layout '{}'", name.trim());
            Ok(())
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { code: EXIT_NOT_FOUND, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ClassroomError> for CliError {
    fn from(err: ClassroomError) -> Self {
        Self { code: engine_exit_code(&err), message: err.to_string(), hint: None }
    }
}
