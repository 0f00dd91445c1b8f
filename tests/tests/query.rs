use tests::prelude::*;

use semimap::stmt::Statement;

fn person(id: i64, name: &str, age: i32) -> CommunicationEntity {
    CommunicationEntity::with_elements(
        "Person",
        vec![
            Element::new("_id", id),
            Element::new("name", name),
            Element::new("age", age),
        ],
    )
}

fn seed_people(driver: &MemoryDriver) {
    driver.seed([
        person(1, "Ada", 36),
        person(2, "Grace", 85),
        person(3, "Alan", 41),
    ]);
}

#[tokio::test]
async fn positional_parameters() {
    let (template, driver) = setup();
    seed_people(&driver);

    let people: Vec<Person> = template
        .query("FROM Person WHERE age > ?1 AND name <> ?2 ORDER BY name DESC")
        .unwrap()
        .bind(1, 40)
        .bind(2, "Alan")
        .result()
        .await
        .unwrap();

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn named_parameters() {
    let (template, driver) = setup();
    seed_people(&driver);

    let people: Vec<Person> = template
        .query("FROM Person WHERE age > :age AND name <> :name ORDER BY name DESC")
        .unwrap()
        .bind_named("age", 40)
        .bind_named("name", "Alan")
        .result()
        .await
        .unwrap();

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn named_values_are_ignored_beside_positional_ones() {
    let (template, driver) = setup();
    seed_people(&driver);

    let res = template
        .query("FROM Person WHERE age > ?1 AND name <> :name")
        .unwrap()
        .bind(1, 40)
        .bind_named("name", "Alan")
        .result::<Person>()
        .await;

    assert_err!(res, is_illegal_argument);
}

#[tokio::test]
async fn unbound_parameters_are_rejected() {
    let (template, _) = setup();

    let res = template
        .query("FROM Person WHERE age > ?1")
        .unwrap()
        .result::<Person>()
        .await;

    assert_err!(res, is_illegal_argument);
}

#[test]
fn field_names_become_columns() {
    let (template, _) = setup();

    let query = template
        .query("FROM Person WHERE id = 1 AND address.city = 'Paris' ORDER BY job.salary")
        .unwrap();

    let Statement::Select(select) = query.statement() else {
        panic!("expected a select");
    };

    assert_eq!(
        select.condition,
        Some(CriteriaCondition::eq("_id", 1_i64).and(CriteriaCondition::eq("city", "Paris")))
    );
    assert_eq!(select.sorts, [Sort::asc("work.salary")]);
}

#[test]
fn entity_names_resolve_to_storage_names() {
    let (template, _) = setup();

    let query = template.query("FROM Order").unwrap();
    assert_eq!(query.statement().name(), "orders");

    let query = template.query("FROM Cat WHERE lives > 3").unwrap();
    assert_eq!(query.statement().name(), "Animal");
    assert_eq!(
        query.statement().condition(),
        Some(&CriteriaCondition::eq("type", "cat").and(CriteriaCondition::gt("lives", 3_i64)))
    );

    assert_err!(template.query("FROM Unicorn"), is_class_information_not_found);
}

#[tokio::test]
async fn single_result_and_count() {
    let (template, driver) = setup();
    seed_people(&driver);

    let ada: Option<Person> = template
        .query("FROM Person WHERE name = 'Ada'")
        .unwrap()
        .single_result()
        .await
        .unwrap();
    assert_eq!(ada.and_then(|p| p.age), Some(36));

    let res = template
        .query("FROM Person WHERE age > 30")
        .unwrap()
        .single_result::<Person>()
        .await;
    assert_err!(res, is_non_unique_result);

    let count = template
        .query("SELECT count(this) FROM Person WHERE age BETWEEN 30 AND 50")
        .unwrap()
        .count()
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn delete_and_update_statements() {
    let (template, driver) = setup();
    seed_people(&driver);

    let updated = template
        .query("UPDATE Person SET age = 37 WHERE name = :name")
        .unwrap()
        .bind_named("name", "Ada")
        .execute_update()
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let removed = template
        .query("DELETE FROM Person WHERE age IN (37, 41)")
        .unwrap()
        .execute_update()
        .await
        .unwrap();
    assert_eq!(removed, 0);

    let left: Vec<Person> = template.find_all().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn terminal_must_match_the_statement() {
    let (template, _) = setup();

    let res = template
        .query("DELETE FROM Person")
        .unwrap()
        .result::<Person>()
        .await;
    assert_err!(res, is_unsupported_operation);

    let res = template
        .query("FROM Person")
        .unwrap()
        .execute_update()
        .await;
    assert_err!(res, is_unsupported_operation);
}

#[test]
fn no_parser_configured() {
    let template = Template::builder()
        .driver(MemoryDriver::new())
        .registry(registry())
        .build()
        .unwrap();

    assert_err!(template.query("FROM Person"), is_unsupported_operation);
}
