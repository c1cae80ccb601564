pub mod orchestration;

pub use orchestration::{
    run_bump_workflow, run_release_notes_workflow, BumpOutcome, BumpWorkflowArgs, NotesOutcome,
    NotesWorkflowArgs,
};
