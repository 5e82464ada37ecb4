use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn gauge_is_continuous_at_segment_boundaries() {
    let [low, pass, high] = GAUGE_SEGMENT_WIDTHS;

    let first_at_14 = (low / 14.0) * 14.0;
    let second_at_14 = low + pass * (14.0 - 14.0);
    assert!(close(first_at_14, 131.0));
    assert!(close(second_at_14, 131.0));
    assert!(close(gauge_position(14.0), 131.0));

    let second_at_15 = low + pass * (15.0 - 14.0);
    let third_at_15 = low + pass + (high / 13.0) * (15.0 - 15.0);
    assert!(close(second_at_15, 170.0));
    assert!(close(third_at_15, 170.0));
    assert!(close(gauge_position(15.0), 170.0));

    assert!(close(gauge_position(13.999_999), 131.0 / 14.0 * 13.999_999));
    assert!(close(gauge_position(28.0), 356.0));
}

#[test]
fn gauge_is_not_clamped() {
    assert!(gauge_position(-1.0) < 0.0);
    assert!(gauge_position(40.0) > 356.0);
}

#[test]
fn zones_split_at_14_and_15() {
    assert_eq!(Zone::from_score(13.99), Zone::NeedsRevision);
    assert_eq!(Zone::from_score(14.0), Zone::Pass);
    assert_eq!(Zone::from_score(15.0), Zone::Pass);
    assert_eq!(Zone::from_score(15.01), Zone::TooComplex);
    assert_eq!(Zone::TooComplex.to_string(), "Too Complex");
}

#[test]
fn grade_table_uses_inclusive_upper_bounds() {
    assert_eq!(GradeLevel::from_score(5.0), GradeLevel::Kindergarten);
    assert_eq!(GradeLevel::from_score(5.01), GradeLevel::Grade(2));
    assert_eq!(GradeLevel::from_score(15.0), GradeLevel::Grade(6));
    assert_eq!(GradeLevel::from_score(27.0), GradeLevel::Grade(12));
    assert_eq!(GradeLevel::from_score(30.0), GradeLevel::College);
    assert_eq!(GradeLevel::from_score(-3.0), GradeLevel::Kindergarten);
}

#[test]
fn grade_labels_read_as_ordinals() {
    let labels: Vec<String> = [4.0, 6.0, 8.0, 10.0, 27.0, 28.0]
        .into_iter()
        .map(|s| GradeLevel::from_score(s).to_string())
        .collect();
    assert_eq!(labels, ["Kindergarten", "2nd", "3rd", "4th", "12th", "College"]);
}

#[test]
fn banner_depends_only_on_required_grade() {
    assert_eq!(banner(15.0), MET_REQUIRED_GRADE_BANNER);
    assert_eq!(banner(13.0), MET_REQUIRED_GRADE_BANNER);
    assert_eq!(banner(15.5), MISSED_REQUIRED_GRADE_BANNER);
}

#[test]
fn report_bundles_the_derived_values() {
    let report = ReadabilityReport::from_score(4.2);
    assert_eq!(report.grade, GradeLevel::Kindergarten);
    assert_eq!(report.zone, Zone::NeedsRevision);
    assert_eq!(report.score_display(), "4.20");
    assert!(report.meets_required_grade());
    assert_eq!(report.banner(), MET_REQUIRED_GRADE_BANNER);

    let missing = ReadabilityReport::from_score(f64::NAN);
    assert_eq!(missing.score, 0.0);
    assert_eq!(missing.gauge_position, 0.0);
}
