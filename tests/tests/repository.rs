use tests::prelude::*;

use semimap::{
    schema::TypeKey, DynRepository, Outcome, Repository, RepositoryMethod, Restriction, ResultKind,
};

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
        person(4, "Edsger", 72),
    ]);
}

fn people() -> (Repository<Person>, MemoryDriver) {
    let (template, driver) = setup();
    seed_people(&driver);
    (Repository::new(template), driver)
}

fn names(people: &[Person]) -> Vec<&str> {
    people.iter().filter_map(|p| p.name.as_deref()).collect()
}

#[tokio::test]
async fn find_by_name() {
    let (repository, driver) = people();

    let found = repository
        .invoke(RepositoryMethod::new("findByName").arg("Ada"))
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq!(names(&found), ["Ada"]);
    assert_eq!(
        driver.log().last_select().unwrap(),
        SelectQuery::new("Person").filter(CriteriaCondition::eq("name", "Ada"))
    );
}

#[tokio::test]
async fn first_and_order_by() {
    let (repository, driver) = people();

    let found = repository
        .invoke(RepositoryMethod::new("findFirst2ByAgeGreaterThanOrderByNameDesc").arg(40))
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq!(names(&found), ["Grace", "Edsger"]);

    let query = driver.log().last_select().unwrap();
    assert_eq!(query.limit, 2);
    assert_eq!(query.sorts, [Sort::desc("name")]);
    assert_eq!(query.condition, Some(CriteriaCondition::gt("age", 40)));
}

#[tokio::test]
async fn or_between_and_negation() {
    let (repository, driver) = people();

    let found = repository
        .invoke(
            RepositoryMethod::new("findByAgeBetweenOrNameNotLike")
                .arg(30)
                .arg(40)
                .arg("A%"),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq_unordered!(names(&found), ["Ada", "Grace", "Edsger"]);

    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(
            CriteriaCondition::between("age", 30, 40)
                .or(CriteriaCondition::not(CriteriaCondition::like("name", "A%")))
        )
    );
}

#[tokio::test]
async fn nested_property_paths() {
    let (template, driver) = setup();
    let repository = Repository::<Person>::new(template);

    repository
        .invoke(RepositoryMethod::new("findByAddress_CityAndJob_Title").arg("Paris").arg("Chef"))
        .await
        .unwrap();

    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(CriteriaCondition::eq("city", "Paris").and(CriteriaCondition::eq("work.title", "Chef")))
    );
}

#[tokio::test]
async fn count_exists_and_delete() {
    let (repository, driver) = people();

    let count = repository
        .invoke(RepositoryMethod::new("countByAgeGreaterThan").arg(40))
        .await
        .unwrap()
        .into_count()
        .unwrap();
    assert_eq!(count, 3);

    let exists = repository
        .invoke(RepositoryMethod::new("existsByName").arg("Alan"))
        .await
        .unwrap()
        .into_exists()
        .unwrap();
    assert!(exists);

    let outcome = repository
        .invoke(RepositoryMethod::new("deleteByAgeLessThan").arg(50))
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Unit));
    assert_eq!(driver.stored("Person").len(), 2);
}

#[tokio::test]
async fn argument_count_must_match() {
    let (repository, driver) = people();

    let res = repository
        .invoke(RepositoryMethod::new("findByNameAndAge").arg("Ada"))
        .await;
    assert_err!(res, is_illegal_argument);
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn single_result_kind() {
    let (repository, _) = people();

    let one = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Grace")
                .returns(ResultKind::Single),
        )
        .await
        .unwrap()
        .into_one()
        .unwrap();
    assert_eq!(one.and_then(|p| p.age), Some(85));

    let none = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Bob")
                .returns(ResultKind::Single),
        )
        .await
        .unwrap()
        .into_one()
        .unwrap();
    assert_eq!(none, None);

    let res = repository
        .invoke(
            RepositoryMethod::new("findByAgeGreaterThan")
                .arg(40)
                .returns(ResultKind::Single),
        )
        .await;
    assert_err!(res, is_non_unique_result);
}

#[tokio::test]
async fn pages_from_arguments() {
    let (repository, _) = people();

    let page = repository
        .invoke(
            RepositoryMethod::new("findByAgeGreaterThan")
                .arg(30)
                .sort("name", Direction::Asc)
                .page(PageRequest::of_page(2, 3).unwrap()),
        )
        .await
        .unwrap()
        .into_page()
        .unwrap();

    assert_eq!(names(page.content()), ["Grace"]);
    assert!(!page.has_next());

    let page = repository
        .invoke(
            RepositoryMethod::new("findByAgeGreaterThanOrderByAgeAsc")
                .arg(30)
                .page(PageRequest::of_size(3).unwrap().into_cursor()),
        )
        .await
        .unwrap()
        .into_cursor_page()
        .unwrap();

    assert_eq!(names(page.content()), ["Ada", "Alan", "Edsger"]);
    assert!(page.has_next());
}

#[tokio::test]
async fn cursor_pages_check_the_sorts() {
    let (repository, driver) = people();

    let res = repository
        .invoke(
            RepositoryMethod::new("findByAgeGreaterThanOrderByAgeAscNameAsc")
                .arg(30)
                .page(PageRequest::of_size(3).unwrap().into_cursor()),
        )
        .await;

    let err = res.unwrap_err();
    assert!(err.is_precondition_failed());
    assert!(err.to_string().contains(Config::CURSOR_MULTIPLE_SORTS));
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn limits_take_the_smallest() {
    let (repository, driver) = people();

    repository
        .invoke(
            RepositoryMethod::new("findTop3ByAgeGreaterThan")
                .arg(0)
                .first(5)
                .limit(2),
        )
        .await
        .unwrap();

    assert_eq!(driver.log().last_select().unwrap().limit, 2);
}

#[tokio::test]
async fn projections() {
    let (repository, driver) = people();

    let values = repository
        .invoke(
            RepositoryMethod::new("findByAgeLessThanOrderByAgeAsc")
                .arg(50)
                .select(["name"]),
        )
        .await
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(values, [Value::from("Ada"), Value::from("Alan")]);
    assert_eq!(driver.log().last_select().unwrap().columns, ["name"]);

    let value = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Grace")
                .select(["name", "age"])
                .returns(ResultKind::Single),
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(
        value,
        Some(Value::List(vec![Value::from("Grace"), Value::I32(85)]))
    );

    let res = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Grace")
                .select(["name"])
                .page(PageRequest::of_page(1, 2).unwrap()),
        )
        .await;
    assert_err!(res, is_illegal_argument);
}

#[tokio::test]
async fn declared_queries() {
    let (repository, driver) = people();

    let found = repository
        .invoke(
            RepositoryMethod::new("olderThan")
                .query("FROM Person WHERE age > ?1 ORDER BY age")
                .arg(50),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();
    assert_eq!(names(&found), ["Edsger", "Grace"]);

    let count = repository
        .invoke(
            RepositoryMethod::new("countNamed")
                .query("SELECT count(this) FROM Person WHERE name = :name")
                .named_arg("name", "Ada"),
        )
        .await
        .unwrap()
        .into_count()
        .unwrap();
    assert_eq!(count, 1);

    let updated = repository
        .invoke(
            RepositoryMethod::new("birthday")
                .query("UPDATE Person SET age = 37 WHERE name = ?1")
                .arg("Ada"),
        )
        .await
        .unwrap()
        .into_count()
        .unwrap();
    assert_eq!(updated, 1);

    repository
        .invoke(
            RepositoryMethod::new("purge")
                .query("DELETE FROM Person WHERE age > 80")
                .restriction(Restriction::eq("name", "Grace")),
        )
        .await
        .unwrap();

    assert_eq!(
        driver.log().last_delete().unwrap().condition,
        Some(CriteriaCondition::gt("age", 80_i64).and(CriteriaCondition::eq("name", "Grace")))
    );
    assert_eq!(driver.stored("Person").len(), 3);
}

#[tokio::test]
async fn restrictions_and_builtins() {
    let (repository, driver) = people();

    let found = repository
        .invoke(
            RepositoryMethod::new("findAll")
                .restriction(Restriction::gt("age", 40).and(Restriction::lt("age", 80)))
                .sort("age", Direction::Desc),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();
    assert_eq!(names(&found), ["Edsger", "Alan"]);

    let found = repository
        .invoke(
            RepositoryMethod::new("findByAgeGreaterThan")
                .arg(40)
                .restriction(Restriction::not(Restriction::eq("name", "Grace"))),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();
    assert_eq_unordered!(names(&found), ["Alan", "Edsger"]);

    let count = repository
        .invoke(RepositoryMethod::new("countAll"))
        .await
        .unwrap()
        .into_count()
        .unwrap();
    assert_eq!(count, 4);

    repository
        .invoke(RepositoryMethod::new("deleteAll").restriction(Restriction::lt("age", 40)))
        .await
        .unwrap();
    assert_eq!(driver.stored("Person").len(), 3);

    let res = repository.invoke(RepositoryMethod::new("frobnicate")).await;
    assert_err!(res, is_unsupported_operation);
}

#[tokio::test]
async fn entity_writes() {
    let (template, driver) = setup();
    let repository = Repository::<Product>::new(template);

    let pen = Product {
        id: "p1".to_string(),
        name: "Pen".to_string(),
        price: 1.5,
    };
    let ink = Product {
        id: "p2".to_string(),
        name: "Ink".to_string(),
        price: 4.0,
    };

    let saved = repository
        .invoke(RepositoryMethod::new("save").arg(pen.clone()))
        .await
        .unwrap()
        .into_one()
        .unwrap();
    assert_eq!(saved, Some(pen.clone()));

    let inserted = repository
        .invoke(RepositoryMethod::new("insertAll").arg(vec![ink.clone()]))
        .await
        .unwrap()
        .into_list()
        .unwrap();
    assert_eq!(inserted, [ink.clone()]);

    let all = repository
        .invoke(RepositoryMethod::new("findAll"))
        .await
        .unwrap()
        .into_list()
        .unwrap();
    assert_eq!(all, [pen.clone(), ink.clone()]);

    let res = repository
        .invoke(RepositoryMethod::new("delete").arg(pen.clone()).arg(ink.clone()))
        .await;
    assert_err!(res, is_illegal_argument);

    repository
        .invoke(RepositoryMethod::new("deleteAll").arg(vec![pen, ink]))
        .await
        .unwrap();
    assert!(driver.stored("Product").is_empty());
}

#[tokio::test]
async fn subtype_repositories() {
    let (template, driver) = setup();
    let dogs = Repository::<Dog>::new(template);

    dogs.invoke(RepositoryMethod::new("findAll")).await.unwrap();
    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(CriteriaCondition::eq("type", "Dog"))
    );

    dogs.invoke(RepositoryMethod::new("findByBreed").arg("Collie"))
        .await
        .unwrap();
    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(CriteriaCondition::eq("type", "Dog").and(CriteriaCondition::eq("breed", "Collie")))
    );

    dogs.invoke(RepositoryMethod::new("deleteAll")).await.unwrap();
    assert_eq!(
        driver.log().last_delete().unwrap().condition,
        Some(CriteriaCondition::eq("type", "Dog"))
    );
}

#[tokio::test]
async fn subtype_or_conditions_stay_inside_the_subtype() {
    let (template, driver) = setup();
    let dogs = Repository::<Dog>::new(template);

    driver.seed([
        CommunicationEntity::with_elements(
            "Animal",
            vec![
                Element::new("_id", "d1"),
                Element::new("name", "Rex"),
                Element::new("breed", "Collie"),
                Element::new("type", "Dog"),
            ],
        ),
        CommunicationEntity::with_elements(
            "Animal",
            vec![
                Element::new("_id", "c1"),
                Element::new("name", "Tom"),
                Element::new("lives", 9),
                Element::new("type", "cat"),
            ],
        ),
    ]);

    let found = dogs
        .invoke(RepositoryMethod::new("findByNameOrBreed").arg("Tom").arg("Collie"))
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "d1");
    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(CriteriaCondition::eq("type", "Dog").and(
            CriteriaCondition::eq("name", "Tom").or(CriteriaCondition::eq("breed", "Collie"))
        ))
    );

    let found = dogs
        .invoke(
            RepositoryMethod::new("findAll")
                .restriction(Restriction::eq("name", "Tom").or(Restriction::eq("name", "Rex"))),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(
        driver.log().last_select().unwrap().condition,
        Some(CriteriaCondition::eq("type", "Dog").and(
            CriteriaCondition::eq("name", "Tom").or(CriteriaCondition::eq("name", "Rex"))
        ))
    );
}

#[tokio::test]
async fn dynamic_repository_reads_by_declared_type() {
    let (template, driver) = setup();
    seed_people(&driver);

    template
        .insert(Cat {
            id: "tom".to_string(),
            name: "Tom".to_string(),
            lives: 9,
        })
        .await
        .unwrap();

    let repository = DynRepository::new(template);

    let found = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Ada")
                .return_type(TypeKey::of::<Address>())
                .return_type(TypeKey::of::<Person>()),
        )
        .await
        .unwrap()
        .into_list()
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].downcast_ref::<Person>().unwrap().age, Some(36));

    let animal = repository
        .invoke(
            RepositoryMethod::new("findByName")
                .arg("Tom")
                .parameter_type(TypeKey::of::<Animal>())
                .returns(ResultKind::Single),
        )
        .await
        .unwrap()
        .into_one()
        .unwrap()
        .unwrap();

    assert!(animal.is::<Cat>());
}

#[tokio::test]
async fn dynamic_repository_needs_an_entity() {
    let (template, _) = setup();
    let repository = DynRepository::new(template);

    let res = repository
        .invoke(RepositoryMethod::new("findByName").arg("Ada"))
        .await;
    assert_err!(res, is_class_information_not_found);

    let res = repository
        .invoke(
            RepositoryMethod::new("findByStreet")
                .arg("Main")
                .return_type(TypeKey::of::<Address>()),
        )
        .await;
    assert_err!(res, is_class_information_not_found);

    let res = repository
        .invoke(
            RepositoryMethod::new("save")
                .arg(Person::default())
                .parameter_type(TypeKey::of::<Person>()),
        )
        .await;
    assert_err!(res, is_unsupported_operation);
}
