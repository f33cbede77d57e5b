//! `examseat_alloc` v1:
//! Roster allocator for exam seating.
//!
//! Modules:
//! - `parse`     : roster/room tables -> typed students and rooms
//! - `partition` : sequential bucket partitioner
//! - `layout`    : segment -> bench grid
//! - `project`   : allocation -> summary rows / signature blocks
//! - `document`  : projections -> styled sheet plans
//! - `generate`  : the three workbook entry points
//! - `conf`      : file names and format presets
//! - `spec`      : data model and config
//! - `error`     : error type
pub mod conf;
pub mod document;
pub mod error;
pub mod generate;
pub mod layout;
pub mod parse;
pub mod partition;
pub mod project;
pub mod spec;

pub use conf::{C_FILE_ARRANGEMENT, C_FILE_PLAN, C_FILE_SIGNATURE};
pub use document::SeatingDocumentBuilder;
pub use error::{SeatingError, SeatingResult};
pub use generate::{
    create_seating_plan, generate_all, generate_seating_arrangement, generate_signature_list,
};
pub use layout::{SpecRoomGrid, SpecSeat, layout_room_grid};
pub use parse::{
    SpecGridShapePattern, parse_capacity, parse_roster, parse_rooms, parse_signature_roster,
};
pub use partition::partition_students;
pub use project::{
    SpecSignatureBlock, SpecSignatureRow, SpecSummaryRow, project_signature_blocks,
    project_summary,
};
pub use spec::{
    EnumShapeRule, SpecAllocation, SpecGenerationReport, SpecGridShape, SpecRoom, SpecSeatingConfig,
    SpecSegment, SpecStudent,
};
