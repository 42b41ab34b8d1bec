pub const APP_TITLE: &str = "CINEMATCH";
pub const TAGLINE: &str = "Find the exact movie for your mood.";
pub const INPUT_HINT: &str = "What kind of movie are you looking for? Type it and press Enter.";
pub const INSIGHT_HEADING: &str = "AI Curated Insight";
pub const SOURCES_HEADING: &str = "Search Grounding Sources";
pub const MATCH_HEADING: &str = "Match Analysis";

pub const COMMAND_RETRY: &str = ":retry";
pub const COMMAND_QUIT: &str = ":quit";
pub const COMMAND_QUIT_SHORT: &str = ":q";
