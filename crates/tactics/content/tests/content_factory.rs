use std::fs;
use std::path::Path;

use tactics_content::ContentFactory;
use tactics_core::{EntityId, GameOption, TargetRef, evaluate};
use tempfile::TempDir;

const SCENARIO: &str = r#"
(
    board: (dimensions: (width: 10, height: 10), features: []),
    units: [
        (
            id: EntityId(1),
            name: "Wolverine",
            team: TeamId(0),
            kind: BipedMech,
            tonnage: 55,
            position: (col: 4, row: 6),
            weapons: [
                (
                    name: "Medium Laser",
                    class: Energy,
                    location: RightArm,
                    ranges: (short: 3, medium: 6, long: 9),
                ),
            ],
        ),
        (
            id: EntityId(2),
            name: "Locust",
            team: TeamId(1),
            kind: BipedMech,
            tonnage: 20,
            position: (col: 4, row: 3),
            facing: South,
        ),
    ],
    options: { tac_ops_grappling: true },
)
"#;

const ORDERS: &str = r#"
[
    (attacker: EntityId(1), target: Unit(EntityId(2)), kind: WeaponFire((weapon: 0))),
    (attacker: EntityId(1), target: Unit(EntityId(2)), kind: Charge),
]
"#;

fn write_data_dir(rules: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("scenarios")).expect("scenarios dir");
    fs::create_dir_all(dir.path().join("orders")).expect("orders dir");
    fs::write(dir.path().join("rules.toml"), rules).expect("rules");
    fs::write(dir.path().join("scenarios/duel.ron"), SCENARIO).expect("scenario");
    fs::write(dir.path().join("orders/duel.ron"), ORDERS).expect("orders");
    dir
}

#[test]
fn rules_apply_and_scenario_options_win() {
    let dir = write_data_dir("[options]\nfriendly_fire = true\ntac_ops_grappling = false\n");
    let factory = ContentFactory::new(dir.path());

    let snapshot = factory.load_scenario("duel").expect("scenario loads");

    assert!(snapshot.options.flag(GameOption::FriendlyFire));
    assert!(snapshot.options.flag(GameOption::TacOpsGrappling));
    assert_eq!(snapshot.units.len(), 2);
}

#[test]
fn engagement_orders_evaluate_against_their_scenario() {
    let dir = write_data_dir("[options]\n");
    let factory = ContentFactory::new(dir.path());

    let (snapshot, orders) = factory.load_engagement("duel").expect("engagement loads");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].target, TargetRef::Unit(EntityId(2)));

    let env = snapshot.env();
    let shot = evaluate(&orders[0], &env).expect("shot resolves");
    assert_eq!(shot.target_number(), Some(4));

    let charge = evaluate(&orders[1], &env).expect("charge resolves");
    assert_eq!(charge.reason(), Some("Attacker must move to charge"));
}

#[test]
fn bad_rules_abort_scenario_loading() {
    let dir = write_data_dir("[options]\nmystery_rule = true\n");
    let factory = ContentFactory::new(dir.path());

    let error = factory.load_scenario("duel").expect_err("unknown option");
    assert!(error.to_string().contains("mystery_rule"), "{error}");
}

#[test]
fn scenario_names_are_listed_sorted() {
    let dir = write_data_dir("");
    fs::write(dir.path().join("scenarios/ambush.ron"), SCENARIO).expect("second scenario");
    fs::write(dir.path().join("scenarios/notes.txt"), "not a scenario").expect("notes");
    let factory = ContentFactory::new(dir.path());

    assert_eq!(
        factory.scenario_names().expect("listing"),
        ["ambush", "duel"]
    );
    assert!(factory.has_orders("duel"));
    assert!(!factory.has_orders("ambush"));
}

/// The shipped data directory must load and every order must resolve.
#[test]
fn bundled_content_is_consistent() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let factory = ContentFactory::new(&data);

    for name in factory.scenario_names().expect("bundled scenarios") {
        let snapshot = factory.load_scenario(&name).expect("bundled scenario");
        if !factory.has_orders(&name) {
            continue;
        }
        let orders = factory.load_orders(&name).expect("bundled orders");
        let env = snapshot.env();
        for order in &orders {
            let record = evaluate(order, &env)
                .unwrap_or_else(|e| panic!("{name}: order {order} failed: {e}"));
            assert!(
                !record.is_terminal() || record.modifiers.is_empty(),
                "{name}: {order}"
            );
        }
    }
}
