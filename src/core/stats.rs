use serde::{Serialize, Deserialize};
use crate::core::types::Student;

/// Grade bands: A >= 85, B 75-84, C 65-74, D 50-64, F < 50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    F,
}

impl GradeBand {
    pub fn of(mark: f32) -> Self {
        if mark >= 85.0 {
            GradeBand::A
        } else if mark >= 75.0 {
            GradeBand::B
        } else if mark >= 65.0 {
            GradeBand::C
        } else if mark >= 50.0 {
            GradeBand::D
        } else {
            GradeBand::F
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub f: usize,
}

impl BandCounts {
    fn record(&mut self, band: GradeBand) {
        match band {
            GradeBand::A => self.a += 1,
            GradeBand::B => self.b += 1,
            GradeBand::C => self.c += 1,
            GradeBand::D => self.d += 1,
            GradeBand::F => self.f += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.c + self.d + self.f
    }
}

/// Snapshot of aggregate statistics over the current records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub average: f64,             // 0.0 when count == 0
    pub min_mark: f32,
    pub max_mark: f32,
    pub min_idx: Option<usize>,   // first record attaining min_mark
    pub max_idx: Option<usize>,   // first record attaining max_mark
    pub bands: BandCounts,
}

impl Stats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Single pass over `records`
pub fn compute_stats(records: &[Student]) -> Stats {
    let mut stats = Stats {
        count: records.len(),
        average: 0.0,
        min_mark: 0.0,
        max_mark: 0.0,
        min_idx: None,
        max_idx: None,
        bands: BandCounts::default(),
    };

    let Some(first) = records.first() else {
        return stats;
    };

    stats.min_mark = first.mark;
    stats.max_mark = first.mark;
    stats.min_idx = Some(0);
    stats.max_idx = Some(0);

    let mut sum = 0.0f64;
    for (i, student) in records.iter().enumerate() {
        let mark = student.mark;
        sum += f64::from(mark);

        // strict comparisons keep the first occurrence
        if mark < stats.min_mark {
            stats.min_mark = mark;
            stats.min_idx = Some(i);
        }
        if mark > stats.max_mark {
            stats.max_mark = mark;
            stats.max_idx = Some(i);
        }

        stats.bands.record(GradeBand::of(mark));
    }

    stats.average = sum / records.len() as f64;
    stats
}
