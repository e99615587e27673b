pub mod core {
    pub mod best_times;
    pub mod competitor;
    pub mod controller;
    pub mod cursor;
    pub mod handle_playback;
    pub mod position_delta;
    pub mod records;
    pub mod snapshot;
    pub mod timeline;
}

pub mod interfaces {
    pub mod renderer_interface;
}

pub mod post {
    pub mod standings;
}

pub mod pre {
    pub mod check_sim_opts_session;
    pub mod read_session_data;
    pub mod sim_opts;
}

#[cfg(test)]
mod test_data {
    use crate::core::competitor::Competitor;
    use crate::core::records::{LapRecord, PositionRecord, RaceControlMessage};
    use crate::pre::read_session_data::SessionData;

    pub const NOW: &str = "2024-01-01T00:00:00.000000+00:00";

    /// t returns the timestamp t seconds after the session start.
    pub fn t(secs: u32) -> String {
        format!(
            "2023-09-16T{:02}:{:02}:{:02}.000000+00:00",
            13 + secs / 3600,
            secs / 60 % 60,
            secs % 60
        )
    }

    pub fn competitor(
        driver_number: u32,
        name_acronym: &str,
        team_colour: Option<&str>,
    ) -> Competitor {
        Competitor {
            driver_number,
            name_acronym: name_acronym.to_owned(),
            full_name: None,
            broadcast_name: None,
            team_name: Some(String::from("Team")),
            team_colour: team_colour.map(|x| x.to_owned()),
            headshot_url: None,
            country_code: None,
        }
    }

    pub fn position(secs: u32, driver_number: u32, position: u32) -> PositionRecord {
        PositionRecord {
            date: t(secs),
            driver_number,
            position,
        }
    }

    pub fn lap(driver_number: u32, lap_number: u32, times: [Option<f64>; 4]) -> LapRecord {
        LapRecord {
            date_start: Some(t(lap_number * 100)),
            driver_number,
            lap_number,
            lap_duration: times[0],
            duration_sector_1: times[1],
            duration_sector_2: times[2],
            duration_sector_3: times[3],
            is_pit_out_lap: false,
        }
    }

    pub fn message(secs: u32, text: &str) -> RaceControlMessage {
        RaceControlMessage {
            date: t(secs),
            category: None,
            flag: None,
            message: text.to_owned(),
        }
    }

    /// scenario_session returns a session with the drivers A (car 1) and B (car 44), who swap
    /// positions at t = 10s. A completes a lap starting at t = 5s.
    pub fn scenario_session() -> SessionData {
        let mut lap_a = lap(1, 1, [Some(62.345), Some(20.1), Some(22.1), Some(20.145)]);
        lap_a.date_start = Some(t(5));

        SessionData {
            drivers: vec![
                competitor(1, "AAA", Some("3671C6")),
                competitor(44, "BBB", None),
            ],
            positions: vec![
                position(0, 1, 1),
                position(0, 44, 2),
                position(10, 1, 2),
                position(10, 44, 1),
            ],
            laps: vec![lap_a],
            messages: vec![],
        }
    }
}




#[cfg(test)]
mod cursor_tests {
    use crate::core::best_times::{BestTimeTracker, Metric, TimeClass};
    use crate::core::cursor::PlaybackCursor;
    use crate::core::position_delta::{classify, PositionDelta};
    use crate::core::snapshot::RaceStateSnapshot;
    use crate::core::timeline::build_timeline;
    use crate::test_data::{competitor, message, position, scenario_session, NOW};
    use approx::assert_ulps_eq;

    fn scenario_cursor() -> (PlaybackCursor, RaceStateSnapshot) {
        let session = scenario_session();
        let timeline = build_timeline(&session.positions, &session.laps, &session.messages);
        (
            PlaybackCursor::new(timeline),
            RaceStateSnapshot::new(&session.drivers, NOW),
        )
    }

    #[test]
    fn test_advance_zero() {
        let (mut cursor, snapshot) = scenario_cursor();
        let mut best_times = BestTimeTracker::new();
        let snapshot = cursor.advance(&snapshot, 2, &mut best_times, &mut |_| {}, NOW);

        let new_snapshot = cursor.advance(&snapshot, 0, &mut best_times, &mut |_| {}, NOW);

        assert_eq!(new_snapshot, snapshot);
        assert_eq!(cursor.get_idx(), 2);
    }
    #[test]
    fn test_advance_empty_timeline() {
        let mut cursor = PlaybackCursor::default();
        let snapshot = RaceStateSnapshot::new(&[competitor(1, "VER", None)], NOW);
        let mut best_times = BestTimeTracker::new();

        let new_snapshot = cursor.advance(&snapshot, 3, &mut best_times, &mut |_| {}, NOW);

        assert_eq!(new_snapshot, snapshot);
        assert_eq!(cursor.get_idx(), 0);
    }
    #[test]
    fn test_advance_wraparound() {
        let (mut cursor, mut snapshot) = scenario_cursor();
        let mut best_times = BestTimeTracker::new();

        for &idx_exp in [2, 4, 0].iter() {
            snapshot = cursor.advance(&snapshot, 2, &mut best_times, &mut |_| {}, NOW);
            assert_eq!(cursor.get_idx(), idx_exp);
        }
        assert_eq!(snapshot.get_position(1), Some(2));

        // replay continues with the first event (A in position 1)
        snapshot = cursor.advance(&snapshot, 1, &mut best_times, &mut |_| {}, NOW);
        assert_eq!(cursor.get_idx(), 1);
        assert_eq!(snapshot.get_position(1), Some(1));
    }
    #[test]
    fn test_advance_scenario() {
        let (mut cursor, snapshot) = scenario_cursor();
        let mut best_times = BestTimeTracker::new();

        // initial slice (t = 0s)
        let batch_size = cursor.get_initial_slice_len();
        let snapshot_init =
            cursor.advance(&snapshot, batch_size, &mut best_times, &mut |_| {}, NOW);
        let order: Vec<(u32, u32)> = snapshot_init
            .positions
            .iter()
            .map(|x| (x.driver_number, x.position))
            .collect();
        assert_eq!(order, vec![(1, 1), (44, 2)]);

        // remaining three events
        let snapshot = cursor.advance(&snapshot_init, 3, &mut best_times, &mut |_| {}, NOW);
        let order: Vec<(u32, u32)> = snapshot
            .positions
            .iter()
            .map(|x| (x.driver_number, x.position))
            .collect();
        assert_eq!(order, vec![(44, 1), (1, 2)]);
        assert_ulps_eq!(
            snapshot.latest_lap_by_competitor[&1].lap_duration.unwrap(),
            62.345
        );

        let classification = best_times.get_latest_classification(1).unwrap();
        for &metric in Metric::ALL.iter() {
            assert_eq!(classification.get(metric), TimeClass::OverallBest);
        }

        let prev_positions = snapshot_init.get_position_map();
        assert_eq!(classify(&prev_positions, 1, 2), PositionDelta::Worsened);
        assert_eq!(classify(&prev_positions, 44, 1), PositionDelta::Improved);
    }
    #[test]
    fn test_advance_notifications() {
        let roster = vec![competitor(1, "VER", None)];
        let messages = vec![message(3, "M3"), message(1, "M1"), message(2, "M2")];
        let timeline = build_timeline(&[position(0, 1, 1)], &[], &messages);
        let mut cursor = PlaybackCursor::new(timeline);
        let mut best_times = BestTimeTracker::new();
        let mut notified: Vec<String> = vec![];
        let mut notify = |msg: &str| notified.push(msg.to_owned());

        // whole timeline in one batch, then across the wrap
        let snapshot = RaceStateSnapshot::new(&roster, NOW);
        let snapshot = cursor.advance(&snapshot, 10, &mut best_times, &mut notify, NOW);
        assert_eq!(cursor.get_idx(), 0);
        let snapshot = cursor.advance(&snapshot, 2, &mut best_times, &mut notify, NOW);

        assert_eq!(notified, vec!["M1", "M2", "M3", "M1"]);
        assert_eq!(snapshot.messages.len(), 4);
        assert_eq!(snapshot.messages[0].message, "M1");
        assert_eq!(snapshot.messages[1].message, "M3");
    }
}




#[cfg(test)]
mod renderer_interface_tests {
    use crate::core::best_times::TimeClass;
    use crate::core::controller::PlaybackController;
    use crate::core::position_delta::PositionDelta;
    use crate::interfaces::renderer_interface::{parse_team_colour, RenderState, RgbColor};
    use crate::test_data::scenario_session;
    use std::time::Duration;

    #[test]
    fn test_parse_team_colour() {
        let color = parse_team_colour("3671C6").unwrap();
        assert_eq!(color, RgbColor { r: 54, g: 113, b: 198 });
        assert_eq!(parse_team_colour("#FFFFFF").unwrap(), RgbColor::WHITE);
    }
    #[test]
    fn test_parse_team_colour_invalid() {
        assert!(parse_team_colour("").is_err());
        assert!(parse_team_colour("GGHHII").is_err());
    }
    #[test]
    fn test_render_state() {
        let mut controller = PlaybackController::new(Duration::from_millis(2000));
        controller.load_data(scenario_session()).unwrap();
        controller.set_speed(3).unwrap();
        controller.step();

        let render_state = RenderState::from_controller(&controller);

        assert_eq!(render_state.rows.len(), 2);
        assert_eq!(render_state.rows[0].driver_number, 44);
        assert_eq!(render_state.rows[0].position_delta, PositionDelta::Improved);
        assert_eq!(render_state.rows[0].color, RgbColor::WHITE);
        assert!(render_state.rows[0].latest_lap.is_none());

        assert_eq!(render_state.rows[1].display_name, "AAA");
        assert_eq!(render_state.rows[1].position, 2);
        assert_eq!(render_state.rows[1].position_delta, PositionDelta::Worsened);
        assert_eq!(render_state.rows[1].color, RgbColor { r: 54, g: 113, b: 198 });
        assert_eq!(
            render_state.rows[1].lap_classification.unwrap().lap,
            TimeClass::OverallBest
        );
        assert_eq!(render_state.timeline_len, 5);
        assert_eq!(render_state.speed, 3);
    }
}

#[cfg(test)]
mod pre_tests {
    use crate::pre::check_sim_opts_session::{check_session_data, check_sim_opts};
    use crate::pre::read_session_data::{read_session_data, SessionData};
    use crate::pre::sim_opts::SimOpts;
    use crate::test_data::{competitor, scenario_session};
    use std::path::{Path, PathBuf};

    fn sim_opts() -> SimOpts {
        SimOpts {
            debug: false,
            realtime: false,
            session_path: PathBuf::from("session.json"),
            speed: 1,
            no_ticks: None,
            base_interval_ms: 2000,
            output_path: None,
        }
    }

    #[test]
    fn test_check_sim_opts() {
        assert!(check_sim_opts(&sim_opts()).is_ok());

        let mut tmp_opts = sim_opts();
        tmp_opts.speed = 0;
        assert!(check_sim_opts(&tmp_opts).is_err());

        let mut tmp_opts = sim_opts();
        tmp_opts.no_ticks = Some(0);
        assert!(check_sim_opts(&tmp_opts).is_err());
    }
    #[test]
    fn test_check_session_data() {
        assert!(check_session_data(&scenario_session()).is_ok());

        let mut session = scenario_session();
        session.drivers.push(competitor(1, "DUP", None));
        assert!(check_session_data(&session).is_err());

        let mut session = scenario_session();
        session.positions[0].position = 0;
        assert!(check_session_data(&session).is_err());

        let mut session = scenario_session();
        session.drivers[0].team_colour = Some(String::from("not a colour"));
        assert!(check_session_data(&session).is_err());

        let mut session = scenario_session();
        session.drivers.clear();
        assert!(check_session_data(&session).is_err());
    }
    #[test]
    fn test_session_data_shape() {
        let json = r#"{
            "drivers": [{"driver_number": 1, "name_acronym": "VER", "team_colour": null}],
            "positions": [{"date": "2023-09-16T13:00:00+00:00", "driver_number": 1, "position": 1}],
            "laps": [{"date_start": null, "driver_number": 1, "lap_number": 1}]
        }"#;
        let session: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(session.drivers.len(), 1);
        assert_eq!(session.laps.len(), 1);
        assert!(session.messages.is_empty());

        // non-array where an array is expected
        assert!(serde_json::from_str::<SessionData>(r#"{"drivers": {}}"#).is_err());
    }
    #[test]
    fn test_read_session_data_missing_file() {
        assert!(read_session_data(Path::new("/nonexistent/session.json")).is_err());
    }
}

#[cfg(test)]
mod standings_tests {
    use crate::core::controller::PlaybackController;
    use crate::post::standings::Standings;
    use crate::test_data::scenario_session;
    use std::time::Duration;

    #[test]
    fn test_standings_string() {
        let mut controller = PlaybackController::new(Duration::from_millis(2000));
        controller.load_data(scenario_session()).unwrap();
        controller.set_speed(3).unwrap();
        controller.step();

        let standings = Standings::new(controller.get_snapshot(), controller.get_best_times());
        let lines: Vec<String> = standings
            .get_standings_string()
            .lines()
            .map(|x| x.to_owned())
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  1,  44"));
        assert!(lines[2].contains("1:02.345*"));
        assert!(lines[2].contains("20.145*"));
    }
}
