//! Constants used throughout the triage core crate.
//!
//! Transcript text lives here so that the interactive driver, the script runner and the tests
//! all agree on the exact wording.

/// Prompt printed before each interactive command and before each replayed file line.
pub const PROMPT: &str = "triage> ";

/// Column width of the arrival number in the patient listing.
pub const ARRIVAL_COLUMN_WIDTH: usize = 14;

/// Column width of the severity code in the patient listing.
pub const SEVERITY_COLUMN_WIDTH: usize = 15;

/// Column width of the patient name in the patient listing.
pub const NAME_COLUMN_WIDTH: usize = 20;

/// Column titles printed by `list` above the rendered queue.
pub const LIST_HEADER: &str = "  Arrival #   Priority Code   Patient Name";

/// Rule printed by `list` under [`LIST_HEADER`].
pub const LIST_RULE: &str = "+-----------+---------------+--------------+";

/// Keyword that starts every snapshot line.
pub const SNAPSHOT_ADD_KEYWORD: &str = "add";

/// Default limit on `load` commands nested inside loaded files.
pub const DEFAULT_MAX_LOAD_DEPTH: usize = 8;

/// Environment variable naming the directory for relative snapshot paths.
pub const DATA_DIR_ENV: &str = "TRIAGE_DATA_DIR";

/// Environment variable overriding [`DEFAULT_MAX_LOAD_DEPTH`].
pub const MAX_LOAD_DEPTH_ENV: &str = "TRIAGE_MAX_LOAD_DEPTH";

pub const WELCOME: &str = " Welcome to the hospital triage system. ";

pub const GOODBYE: &str = "Thank you for using the hospital triage system\nBye!";

pub const NO_PATIENTS_WAITING: &str = "There are no patients in the waiting area.";

pub const INVALID_UTF8_LINE: &str = "input line is not valid UTF-8.";

pub const HELP: &str = "\
add <priority-code> <patient-name>
          Adds the patient to the triage system.
          <priority-code> must be one of the 4 accepted priority codes:
          1. immediate 2. emergency 3. urgent 4. routine
          (minimal is accepted as another name for routine)
          <patient-name>: patient's full legal name (may contain spaces)
next:      Announces the patient to be seen next.
           Takes into account the type of emergency and the
           patient's arrival order.
peek:      Displays the patient that is next in line,
           but keeps them in the queue.
list:      Displays the list of all patients that are still
           waiting, in the queue's internal order.
change <arrival-id> <priority-code>
           Changes the priority code of a waiting patient.
save <file-name>
           Writes the waiting patients to a file as add commands.
load <file-name>
           Reads the file and executes the command on each line.
help:      Displays this menu
quit:      Exits the program";
