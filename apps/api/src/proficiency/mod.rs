// Skill proficiency derived from a candidate's projects.
// Pure classification and chip selection; handlers only adapt JSON in and out.

pub mod chips;
pub mod classifier;
pub mod handlers;
pub mod models;
