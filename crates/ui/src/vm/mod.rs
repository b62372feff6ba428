mod catalog_vm;
mod quiz_vm;
mod time_fmt;

pub use catalog_vm::{
    QuestCardVm, SummaryTile, TestCardVm, TrackCardVm, map_quest_cards, map_test_cards,
    map_track_cards, parse_track_code, summary_tiles,
};
pub use quiz_vm::{OptionVm, QuizEffect, QuizIntent, QuizVm, start_quiz};
pub use time_fmt::format_timestamp;
