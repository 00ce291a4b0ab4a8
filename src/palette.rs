use crate::model::WeekGrid;

pub const BUCKET_COUNT: u32 = 5;

const DARK_BUCKETS: [&str; BUCKET_COUNT as usize] =
    ["#0B3D0B", "#0F4F0F", "#129012", "#16B316", "#1AFF1A"];
const LIGHT_BUCKETS: [&str; BUCKET_COUNT as usize] =
    ["#216e39", "#30a14e", "#40c463", "#8fdc85", "#c6f7d0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_light_mode(light_mode: bool) -> Self {
        if light_mode {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn buckets(self) -> &'static [&'static str; BUCKET_COUNT as usize] {
        match self {
            Theme::Dark => &DARK_BUCKETS,
            Theme::Light => &LIGHT_BUCKETS,
        }
    }

    pub fn zero_color(self) -> &'static str {
        match self {
            Theme::Dark => "#000000",
            Theme::Light => "#ebedf0",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Theme::Dark => "#000000",
            Theme::Light => "#ffffff",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Theme::Dark => "white",
            Theme::Light => "black",
        }
    }

    pub fn brightest(self) -> &'static str {
        self.buckets()[BUCKET_COUNT as usize - 1]
    }

    pub fn mid(self) -> &'static str {
        self.buckets()[BUCKET_COUNT as usize / 2]
    }
}

/// Bucket index of a nonzero count, always within `0..BUCKET_COUNT`.
pub fn bucket_index(count: u32, max_count: u32) -> usize {
    let width = max_count.saturating_sub(1).div_ceil(BUCKET_COUNT).max(1);
    let index = count.saturating_sub(1) / width;
    index.min(BUCKET_COUNT - 1) as usize
}

pub fn color_for(count: u32, max_count: u32, theme: Theme) -> &'static str {
    if count == 0 {
        return theme.zero_color();
    }
    theme.buckets()[bucket_index(count, max_count)]
}

/// Assigns every day's color. The maximum must be known before any day is
/// colored, so this runs as two separate passes over the grid.
pub fn colorize(grid: &mut WeekGrid, theme: Theme) {
    let max_count = grid.max_count();
    for day in grid.days_mut() {
        day.color = color_for(day.count, max_count, theme).to_string();
    }
}
