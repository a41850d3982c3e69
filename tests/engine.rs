//! End-to-end checks of the settlement engine through the public API.

use handicap::{
    compute_line_result, format_line, reverse_direction, settle_odd, Ladder, Line, MatchScore,
    OddInfo, OddType, Outcome, Period, Selection, Settler, FieldPolicy, Variety,
};

fn line(s: &str) -> Line {
    s.parse().unwrap()
}

/// A finished match with every field recorded.
fn finished(score1: u32, score2: u32) -> MatchScore {
    MatchScore {
        score1: Some(score1),
        score2: Some(score2),
        corner1: Some(7),
        corner2: Some(3),
        score1_period1: Some(0),
        score2_period1: Some(0),
        corner1_period1: Some(4),
        corner2_period1: Some(1),
    }
}

fn goal_full(t: OddType, l: &str, snap: &MatchScore) -> Option<(Outcome, String)> {
    settle_odd(t, Variety::Goal, Period::RegularTime, &line(l), snap).map(|r| (r.result, r.score))
}

#[test]
fn test_listed_settlement_cases() {
    assert_eq!(goal_full(OddType::Ah1, "-0.5", &finished(2, 1)), Some((Outcome::Win, "2:1".into())));
    assert_eq!(goal_full(OddType::Ah1, "0.5", &finished(1, 2)), Some((Outcome::Loss, "1:2".into())));
    assert_eq!(goal_full(OddType::Over, "2.5", &finished(1, 2)), Some((Outcome::Win, "3".into())));
    assert_eq!(goal_full(OddType::Under, "2.5", &finished(1, 1)), Some((Outcome::Win, "2".into())));
    assert_eq!(goal_full(OddType::Draw, "0", &finished(1, 1)).map(|r| r.0), Some(Outcome::Win));
    assert_eq!(goal_full(OddType::Draw, "0", &finished(1, 0)).map(|r| r.0), Some(Outcome::Loss));
}

#[test]
fn test_quarter_line_split() {
    assert_eq!(compute_line_result(&line("0.25"), 1, 1), Outcome::Win);
    assert_eq!(compute_line_result(&line("0.25"), 1, 1).as_i8(), 1);
}

#[test]
fn test_first_half_corners_required() {
    let mut snap = finished(1, 1);
    snap.corner2_period1 = None;
    let r = settle_odd(OddType::Over, Variety::Corner, Period::Period1, &line("4.5"), &snap);
    assert!(r.is_none());

    snap.corner2_period1 = Some(1);
    let r = settle_odd(OddType::Over, Variety::Corner, Period::Period1, &line("4.5"), &snap).unwrap();
    assert_eq!(r.result, Outcome::Win);
    assert_eq!(r.score, "5");
}

#[test]
fn test_full_time_corner_lines() {
    let snap = finished(0, 0);
    let r = settle_odd(OddType::Ah2, Variety::Corner, Period::RegularTime, &line("3.75"), &snap)
        .unwrap();
    // 3 + 3.5 - 7 loses, 3 + 4 - 7 pushes
    assert_eq!(r.result, Outcome::Loss);
    assert_eq!(r.score, "7:3");
}

#[test]
fn test_policy_difference_on_bare_goals() {
    let bare = MatchScore::goals(1, 1);
    let info = OddInfo {
        condition: Line::ZERO,
        variety: Variety::Goal,
        period: Period::RegularTime,
        odd_type: OddType::Draw,
    };
    assert!(Settler::default().settle_info(&info, &bare).is_none());
    let r = Settler::new(FieldPolicy::Strict).settle_info(&info, &bare).unwrap();
    assert_eq!(r.result, Outcome::Win);
}

#[test]
fn test_reversed_bet_settles_opposite_on_whole_lines() {
    let snap = finished(3, 1);
    for (t, l) in [(OddType::Ah1, "-1.5"), (OddType::Ah2, "2"), (OddType::Over, "3.5"), (OddType::Under, "4")] {
        let sel = Selection::new(t, line(l));
        let rev = reverse_direction(sel);
        let a = settle_odd(sel.odd_type, Variety::Goal, Period::RegularTime, &sel.condition, &snap).unwrap();
        let b = settle_odd(rev.odd_type, Variety::Goal, Period::RegularTime, &rev.condition, &snap).unwrap();
        assert_eq!(a.result, -b.result, "{sel} vs {rev}");
    }
}

#[test]
fn test_format_cases() {
    assert_eq!(format_line(&line("3"), OddType::Ah1), "+3");
    assert_eq!(format_line(&line("-3"), OddType::Ah1), "-3");
    assert_eq!(format_line(&line("0"), OddType::Ah1), "0");
    assert_eq!(format_line(&line("3"), OddType::Over), "3");
}

#[test]
fn test_every_ladder_value_settles() {
    let ladder = Ladder::default();
    let snap = finished(2, 2);
    for opt in ladder.handicaps() {
        assert!(settle_odd(OddType::Ah1, Variety::Goal, Period::RegularTime, &opt.value, &snap).is_some());
    }
    for opt in ladder.totals() {
        let over = settle_odd(OddType::Over, Variety::Goal, Period::RegularTime, &opt.value, &snap).unwrap();
        let under = settle_odd(OddType::Under, Variety::Goal, Period::RegularTime, &opt.value, &snap).unwrap();
        assert_eq!(over.result, -under.result, "total {}", opt.value);
    }
}
