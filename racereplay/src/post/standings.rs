use crate::core::best_times::{BestTimeTracker, Metric, TimeClass};
use crate::core::snapshot::RaceStateSnapshot;
use helpers::general::format_laptime;
use std::fmt::Write;

/// StandingsEntry is used to store the information shown for a driver in the standings.
pub struct StandingsEntry {
    pub position: u32,
    pub driver_number: u32,
    pub display_name: String,
    pub lap_number: Option<u32>,
    pub times: [Option<f64>; 4],
    pub time_classes: [TimeClass; 4],
}

/// Standings contains the running order with the latest laps that is required for post-processing
/// the replay.
pub struct Standings {
    pub entries: Vec<StandingsEntry>,
    pub overall_bests: [Option<f64>; 4],
}

impl Standings {
    pub fn new(snapshot: &RaceStateSnapshot, best_times: &BestTimeTracker) -> Standings {
        let entries = snapshot
            .positions
            .iter()
            .map(|pos| {
                let lap = snapshot.latest_lap_by_competitor.get(&pos.driver_number);
                let classification = lap.map(|x| best_times.classify(x)).unwrap_or_default();

                StandingsEntry {
                    position: pos.position,
                    driver_number: pos.driver_number,
                    display_name: snapshot
                        .get_competitor(pos.driver_number)
                        .map(|x| x.display_name())
                        .unwrap_or_else(|| format!("#{}", pos.driver_number)),
                    lap_number: lap.map(|x| x.lap_number),
                    times: Metric::ALL.map(|metric| lap.and_then(|x| x.duration(metric))),
                    time_classes: Metric::ALL.map(|metric| classification.get(metric)),
                }
            })
            .collect();

        Standings {
            entries,
            overall_bests: Metric::ALL.map(|metric| best_times.get_overall_best(metric)),
        }
    }

    /// get_standings_string creates the running order table. Overall best times are marked by a *,
    /// personal best times by a +.
    pub fn get_standings_string(&self) -> String {
        let mut tmp_string = String::from(
            "pos,  no,  drv, lap,      time,        s1,        s2,        s3\n",
        );

        for entry in self.entries.iter() {
            write!(
                &mut tmp_string,
                "{:3}, {:3}, {:>4}, {:>3}",
                entry.position,
                entry.driver_number,
                entry.display_name,
                entry
                    .lap_number
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| String::from("-"))
            )
            .unwrap();

            for (t, time_class) in entry.times.iter().zip(entry.time_classes.iter()) {
                let marker = match time_class {
                    TimeClass::OverallBest => "*",
                    TimeClass::PersonalBest => "+",
                    TimeClass::Ordinary => " ",
                };
                write!(&mut tmp_string, ", {:>9}{}", format_laptime(*t), marker).unwrap();
            }

            writeln!(&mut tmp_string).unwrap();
        }

        tmp_string
    }

    /// print_standings prints the running order and the overall best times to the console output.
    pub fn print_standings(&self) {
        let mut tmp_string_bests = String::new();

        for (metric, t) in Metric::ALL.iter().zip(self.overall_bests.iter()) {
            write!(&mut tmp_string_bests, "{:?}: {}  ", metric, format_laptime(*t)).unwrap();
        }

        println!("RESULT: Running order");
        println!("{}", self.get_standings_string());

        println!("RESULT: Overall best times");
        println!("{}", tmp_string_bests.trim_end());
    }
}
