mod help;
mod leaderboard;
mod participant_view;
mod participants;
mod render;

pub use render::render;
