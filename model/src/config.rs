/// Parameters read once from the judge's initialization header: `W M maxChanges N`.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub weeks: usize,
    pub machines: usize,
    pub max_changes: u32,
    pub interactions: u32,
}
