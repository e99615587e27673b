use crate::core::records::LapRecord;
use serde::Serialize;
use std::collections::HashMap;

/// (s) Tolerance used to decide if a time equals the overall best time (durations are results of
/// repeated floating point arithmetic in the timing feed).
pub const BEST_TIME_EPS: f64 = 0.001;

/// Metric is one of the four times that are tracked for every lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Lap,
    Sector1,
    Sector2,
    Sector3,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Lap, Metric::Sector1, Metric::Sector2, Metric::Sector3];
}

/// TimeClass determines how a time is highlighted: `OverallBest` (fastest of all drivers so far),
/// `PersonalBest` (fastest of the driver so far) or `Ordinary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeClass {
    OverallBest,
    PersonalBest,
    Ordinary,
}

impl Default for TimeClass {
    fn default() -> Self {
        TimeClass::Ordinary
    }
}

/// LapClassification contains the time class of every metric of a lap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LapClassification {
    pub lap: TimeClass,
    pub sector_1: TimeClass,
    pub sector_2: TimeClass,
    pub sector_3: TimeClass,
}

impl LapClassification {
    pub fn get(&self, metric: Metric) -> TimeClass {
        match metric {
            Metric::Lap => self.lap,
            Metric::Sector1 => self.sector_1,
            Metric::Sector2 => self.sector_2,
            Metric::Sector3 => self.sector_3,
        }
    }

    fn set(&mut self, metric: Metric, time_class: TimeClass) {
        match metric {
            Metric::Lap => self.lap = time_class,
            Metric::Sector1 => self.sector_1 = time_class,
            Metric::Sector2 => self.sector_2 = time_class,
            Metric::Sector3 => self.sector_3 = time_class,
        }
    }
}

/// BestTimes stores a best time per metric (None if no time was observed yet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BestTimes {
    pub lap: Option<f64>,
    pub sector_1: Option<f64>,
    pub sector_2: Option<f64>,
    pub sector_3: Option<f64>,
}

impl BestTimes {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Lap => self.lap,
            Metric::Sector1 => self.sector_1,
            Metric::Sector2 => self.sector_2,
            Metric::Sector3 => self.sector_3,
        }
    }

    fn set(&mut self, metric: Metric, t: f64) {
        match metric {
            Metric::Lap => self.lap = Some(t),
            Metric::Sector1 => self.sector_1 = Some(t),
            Metric::Sector2 => self.sector_2 = Some(t),
            Metric::Sector3 => self.sector_3 = Some(t),
        }
    }
}

/// The BestTimeTracker keeps track of the personal best times of every driver and of the overall
/// best times of the session. It is fed incrementally with the laps in the order in which they
/// are replayed. Overall best times can only improve: a stored best time is only replaced by a
/// strictly smaller one.
#[derive(Debug, Clone, Default)]
pub struct BestTimeTracker {
    personal_bests: HashMap<u32, BestTimes>,
    overall_bests: BestTimes,
    latest_classifications: HashMap<u32, LapClassification>,
}

impl BestTimeTracker {
    pub fn new() -> BestTimeTracker {
        Default::default()
    }

    /// observe updates the best times with the inserted lap and returns the classification of
    /// its times at the moment of observation. For each metric with timing data:
    /// 1. The personal best is updated if there is none yet or if the time is less or equal to it.
    /// 2. If the personal best was updated, the overall best is updated if there is none yet or if
    /// the time is strictly less than it.
    /// 3. The time is classified as overall best if it differs from the overall best by less than
    /// BEST_TIME_EPS, as personal best if it only updated the personal best, and as ordinary
    /// otherwise.
    pub fn observe(&mut self, lap: &LapRecord) -> LapClassification {
        let personal_bests = self
            .personal_bests
            .entry(lap.driver_number)
            .or_insert_with(BestTimes::default);
        let mut classification = LapClassification::default();

        for &metric in Metric::ALL.iter() {
            let t = match lap.duration(metric) {
                Some(t) => t,
                None => continue,
            };

            // PERSONAL BEST
            let personal_best_improved = match personal_bests.get(metric) {
                Some(t_best) => t <= t_best,
                None => true,
            };

            if !personal_best_improved {
                continue;
            }

            personal_bests.set(metric, t);

            // OVERALL BEST
            let overall_best_improved = match self.overall_bests.get(metric) {
                Some(t_best) => t < t_best,
                None => true,
            };

            if overall_best_improved {
                self.overall_bests.set(metric, t);
            }

            // overall best takes precedence, a time close to the overall best of another driver
            // is highlighted as overall best as well
            let is_overall_best = match self.overall_bests.get(metric) {
                Some(t_best) => (t - t_best).abs() < BEST_TIME_EPS,
                None => false,
            };

            classification.set(
                metric,
                if is_overall_best {
                    TimeClass::OverallBest
                } else {
                    TimeClass::PersonalBest
                },
            );
        }

        self.latest_classifications
            .insert(lap.driver_number, classification);
        classification
    }

    /// classify returns the classification of the times of the inserted lap against the current
    /// best times without changing them. This is used to highlight the latest lap of a driver
    /// when rendering, since a lap that was the overall best when it was observed may have been
    /// beaten in the meantime.
    pub fn classify(&self, lap: &LapRecord) -> LapClassification {
        let personal_bests = self.personal_bests.get(&lap.driver_number);
        let mut classification = LapClassification::default();

        for &metric in Metric::ALL.iter() {
            let t = match lap.duration(metric) {
                Some(t) => t,
                None => continue,
            };

            let is_overall_best = match self.overall_bests.get(metric) {
                Some(t_best) => (t - t_best).abs() < BEST_TIME_EPS,
                None => false,
            };
            let is_personal_best = match personal_bests.and_then(|x| x.get(metric)) {
                Some(t_best) => t <= t_best,
                None => false,
            };

            if is_overall_best {
                classification.set(metric, TimeClass::OverallBest)
            } else if is_personal_best {
                classification.set(metric, TimeClass::PersonalBest)
            }
        }

        classification
    }

    pub fn get_personal_best(&self, driver_number: u32, metric: Metric) -> Option<f64> {
        self.personal_bests
            .get(&driver_number)
            .and_then(|x| x.get(metric))
    }

    pub fn get_overall_best(&self, metric: Metric) -> Option<f64> {
        self.overall_bests.get(metric)
    }

    pub fn get_overall_bests(&self) -> BestTimes {
        self.overall_bests
    }

    /// get_latest_classification returns the classification that observe returned for the most
    /// recent lap of the driver.
    pub fn get_latest_classification(&self, driver_number: u32) -> Option<LapClassification> {
        self.latest_classifications.get(&driver_number).copied()
    }

    /// clear removes all best times, e.g. when the replay is reset.
    pub fn clear(&mut self) {
        self.personal_bests.clear();
        self.overall_bests = BestTimes::default();
        self.latest_classifications.clear();
    }
}
