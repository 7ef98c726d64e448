//! Default fixture set loads and answers catalog queries.

use rusty_money::{Money, iso};
use testresult::TestResult;

use pawpath::{
    booking::WalkType,
    catalog::{Catalog, CatalogError, service::ServiceMode},
    payment::PaymentMethod,
};

#[test]
fn default_set_loads_everything() -> TestResult {
    let catalog = Catalog::from_set("default")?;

    assert_eq!(catalog.list_walkers().len(), 3);
    assert_eq!(catalog.list_products_by_category("all").len(), 7);
    assert_eq!(
        catalog.categories(),
        vec!["all", "food", "treats", "toys", "supplies"]
    );
    assert_eq!(catalog.currency(), Some(iso::KRW));

    let methods: Vec<PaymentMethod> = catalog
        .payment_methods()
        .iter()
        .map(|method| method.id)
        .collect();

    assert_eq!(
        methods,
        vec![
            PaymentMethod::Card,
            PaymentMethod::Kakao,
            PaymentMethod::Naver,
            PaymentMethod::Toss
        ]
    );

    let modes: Vec<ServiceMode> = catalog.service_modes().iter().map(|mode| mode.id).collect();

    assert_eq!(modes, vec![ServiceMode::Walker, ServiceMode::Mall]);
    assert_eq!(catalog.caution_templates().len(), 4);
    assert_eq!(catalog.walk_types().len(), 2);

    Ok(())
}

#[test]
fn products_filter_by_category_and_query() -> TestResult {
    let catalog = Catalog::from_set("default")?;

    let treats: Vec<&str> = catalog
        .list_products_by_category("treats")
        .iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(treats, vec!["p3", "p4"]);

    let pawfect_food: Vec<&str> = catalog
        .search_products("food", "PAWFECT")
        .iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(pawfect_food, vec!["p1"]);
    assert!(catalog.search_products("toys", "harness").is_empty());
    assert_eq!(catalog.search_products("all", "  ").len(), 7);
    assert!(catalog.list_products_by_category("cats").is_empty());

    Ok(())
}

#[test]
fn markdown_prices_are_kept_alongside_price() -> TestResult {
    let catalog = Catalog::from_set("default")?;
    let kibble = catalog.product("p1")?;

    assert_eq!(kibble.price, Money::from_minor(24_000, iso::KRW));
    assert_eq!(
        kibble.original_price,
        Some(Money::from_minor(30_000, iso::KRW))
    );
    assert_eq!(kibble.discount, Some(20));

    Ok(())
}

#[test]
fn walkers_are_found_by_id_and_slot() -> TestResult {
    let catalog = Catalog::from_set("default")?;

    assert_eq!(catalog.walker("w2")?.name, "Choi Junho");
    assert!(matches!(
        catalog.walker("w9"),
        Err(CatalogError::WalkerNotFound(id)) if id == "w9"
    ));

    let at_ten: Vec<&str> = catalog
        .available_walkers("10:00")
        .iter()
        .map(|walker| walker.id.as_str())
        .collect();

    assert_eq!(at_ten, vec!["w1", "w2"]);
    assert!(catalog.available_walkers("03:00").is_empty());

    Ok(())
}

#[test]
fn tariffs_cover_every_walk_type_and_duration() -> TestResult {
    let catalog = Catalog::from_set("default")?;

    for duration in catalog.durations() {
        for walk_type in [WalkType::Single, WalkType::Package] {
            let price = catalog.base_price(walk_type, duration.minutes)?;

            assert!(
                price.to_minor_units() > 0,
                "{walk_type} {} has no price",
                duration.minutes
            );
        }
    }

    assert_eq!(
        catalog.base_price(WalkType::Single, 30)?,
        Money::from_minor(15_000, iso::KRW)
    );
    assert!(matches!(
        catalog.base_price(WalkType::Single, 45),
        Err(CatalogError::NoTariff { minutes: 45, .. })
    ));

    Ok(())
}

#[test]
fn unknown_fixture_set_fails_to_load() {
    assert!(matches!(
        Catalog::from_set("missing"),
        Err(CatalogError::Io(_))
    ));
}
