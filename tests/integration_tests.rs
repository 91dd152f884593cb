//! End-to-end integration tests: load -> join -> session events -> render


use shelf::shelf_io::{self, RenderOptions};
use shelf::shelf_planner::parse_yaml_query;
use shelf::{
    BinaryCollation, Catalog, CategoryId, CollationKind, Error, Event, OutputFormat,
    OwnerFilter, Product, Session, ShelfConfig, SortField,
};
use test_data_gen::{milk_dataset, write_dataset_dir};

fn bundled_session() -> Session {
    let cfg = ShelfConfig::default();
    Session::from_config(&cfg).expect("bundled catalog must load")
}

fn ids(session: &Session) -> Vec<u64> {
    session.render().rows.iter().map(|p| p.id.get()).collect()
}

fn render_table(session: &Session) -> String {
    let view = session.render();
    let opts = RenderOptions {
        sort: view.sort,
        ..Default::default()
    };
    let mut buf = Vec::new();
    shelf_io::render(&mut buf, &view.rows, &opts).expect("render");
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_bundled_catalog_joins_every_product() {
    let session = bundled_session();
    let products = session.catalog().products();
    assert_eq!(products.len(), 10);
    let milk = &products[0];
    assert_eq!(milk.name, "Milk");
    assert_eq!(milk.category.title, "Drinks");
    assert_eq!(milk.user.name, "Roma");
}

#[test]
fn test_session_filters_compose() {
    let mut session = bundled_session();
    let anna = session.catalog().owner_filter("Anna").unwrap();
    session.dispatch(Event::SelectOwner(anna)).unwrap();
    // Anna owns Grocery (1) and Fruits (3).
    assert_eq!(ids(&session), vec![2, 3, 5, 6, 8, 10]);

    session.dispatch(Event::SetQuery("  A ".into())).unwrap();
    assert_eq!(ids(&session), vec![2, 5, 6, 8, 10]);

    session
        .dispatch(Event::ToggleCategory(CategoryId::new(3)))
        .unwrap();
    assert_eq!(ids(&session), vec![8, 10]);

    session.dispatch(Event::SortClick(SortField::Product)).unwrap();
    session.dispatch(Event::SortClick(SortField::Product)).unwrap();
    let names: Vec<String> = session.render().rows.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Banana", "Apple"]);
}

#[test]
fn test_no_match_renders_message_instead_of_table() {
    let mut session = bundled_session();
    session.dispatch(Event::SetQuery("caviar".into())).unwrap();
    assert!(session.render().is_empty());
    assert_eq!(render_table(&session), "No products matching selected criteria\n");

    session.dispatch(Event::ResetAll).unwrap();
    let table = render_table(&session);
    assert!(table.starts_with("ID ↕"));
    assert_eq!(table.lines().count(), 12);
}

#[test]
fn test_reset_all_restores_every_filter() {
    let mut session = bundled_session();
    session
        .dispatch(Event::SelectOwner(session.catalog().owner_filter("Max").unwrap()))
        .unwrap();
    session.dispatch(Event::SetQuery("jack".into())).unwrap();
    session
        .dispatch(Event::ToggleCategory(CategoryId::new(5)))
        .unwrap();
    assert_eq!(ids(&session), vec![4]);

    session.dispatch(Event::ResetAll).unwrap();
    assert_eq!(session.state().owner, OwnerFilter::All);
    assert!(session.state().query.is_empty());
    assert!(session.state().active_categories.is_empty());
    assert_eq!(ids(&session).len(), 10);
}

#[test]
fn test_all_categories_clears_selection() {
    let mut session = bundled_session();
    session.dispatch(Event::ToggleCategory(CategoryId::new(2))).unwrap();
    session.dispatch(Event::ToggleCategory(CategoryId::new(5))).unwrap();
    assert_eq!(ids(&session), vec![1, 4, 7, 9]);
    session.dispatch(Event::AllCategories).unwrap();
    assert!(!session.render().panel.all_categories_outlined);
    assert_eq!(ids(&session).len(), 10);
}

#[test]
fn test_data_dir_round_trip_through_config() {
    let dir = write_dataset_dir(&milk_dataset());
    let cfg = ShelfConfig {
        data_dir: Some(dir.path().display().to_string()),
        collation: CollationKind::Binary,
        ..Default::default()
    };
    let session = Session::from_config(&cfg).unwrap();
    assert_eq!(session.catalog().products().len(), 1);
    assert_eq!(session.render().rows[0].user.name, "Alice");
}

#[test]
fn test_broken_foreign_key_aborts_startup() {
    let mut ds = milk_dataset();
    ds.products.push(Product::new(2, "Ghost", 77));
    let dir = write_dataset_dir(&ds);
    let cfg = ShelfConfig {
        data_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    };
    let err = Session::from_config(&cfg).err().expect("join must fail");
    assert!(err.to_string().contains("missing category 77"), "{}", err);

    assert!(matches!(
        Catalog::from_dataset(ds),
        Err(Error::ReferentialIntegrity { reference: 77, .. })
    ));
}

#[test]
fn test_yaml_query_against_bundled_catalog() {
    let session = bundled_session();
    let doc = parse_yaml_query(
        r#"
owner: all
categories: [Grocery]
sort: { field: product, order: asc }
"#,
    )
    .unwrap();
    let spec = doc.resolve(session.catalog()).unwrap();
    let rows = shelf::prepare_products(session.catalog().products(), &spec, &BinaryCollation);
    let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bread", "Eggs", "Sausage", "Sugar"]);

    let mut buf = Vec::new();
    let opts = RenderOptions {
        format: OutputFormat::Jsonl,
        ..Default::default()
    };
    shelf_io::render(&mut buf, &rows, &opts).unwrap();
    let first: serde_json::Value =
        serde_json::from_str(String::from_utf8(buf).unwrap().lines().next().unwrap()).unwrap();
    assert_eq!(first["product"], "Bread");
    assert_eq!(first["user"], "Anna");
}
