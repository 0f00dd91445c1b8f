use tests::prelude::*;
use tests::{setup_with_events, PLAIN};

use semimap::{schema::Model, Error, EventHooks};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

fn grace() -> Person {
    Person {
        id: Some(2),
        name: Some("Grace".to_string()),
        age: Some(85),
        ..Person::default()
    }
}

#[tokio::test]
async fn insert_then_find_by_id() {
    let (template, driver) = setup();

    let stored = template.insert(grace()).await.unwrap();
    assert_eq!(stored, grace());

    let found = template.find_by_id::<Person>(2_i64).await.unwrap();
    assert_eq!(found, Some(grace()));

    assert_eq!(template.find_by_id::<Person>(3_i64).await.unwrap(), None);
    assert!(template.exists_by_id::<Person>(2_i64).await.unwrap());

    let query = driver.log().last_select().unwrap();
    assert_eq!(query.condition, Some(CriteriaCondition::eq("_id", 2_i64)));
}

#[tokio::test]
async fn save_inserts_or_updates() {
    let (template, driver) = setup();

    template.save(grace()).await.unwrap();
    assert!(matches!(driver.log().last(), Some(Op::Insert { .. })));

    let older = Person {
        age: Some(86),
        ..grace()
    };

    template.save(older.clone()).await.unwrap();
    assert!(matches!(driver.log().last(), Some(Op::Update(_))));

    assert_eq!(template.find_all::<Person>().await.unwrap(), [older]);
}

#[tokio::test]
async fn save_without_id_inserts_directly() {
    let (template, driver) = setup();

    let anonymous = Person {
        name: Some("Anon".to_string()),
        ..Person::default()
    };

    template.save(anonymous).await.unwrap();

    assert_eq!(driver.log().len(), 1);
    assert_eq!(driver.log().inserted()[0].len(), 1);
}

#[tokio::test]
async fn insert_and_update_many() {
    let (template, driver) = setup();

    let products = vec![
        Product {
            id: "p1".to_string(),
            name: "Pen".to_string(),
            price: 1.5,
        },
        Product {
            id: "p2".to_string(),
            name: "Ink".to_string(),
            price: 4.0,
        },
    ];

    let inserted = template.insert_all(products.clone()).await.unwrap();
    assert_eq!(inserted, products);
    assert_eq!(template.count_all::<Product>().await.unwrap(), 2);

    let repriced: Vec<_> = products
        .into_iter()
        .map(|p| Product {
            price: p.price * 2.0,
            ..p
        })
        .collect();

    template.update_all(repriced.clone()).await.unwrap();
    assert_eq!(driver.log().count(|op| matches!(op, Op::Update(_))), 2);

    let expensive = template
        .select::<Product>()
        .filter("price")
        .gt(5)
        .result()
        .await
        .unwrap();
    assert_eq!(expensive, [repriced[1].clone()]);
}

#[tokio::test]
async fn entity_and_fluent_updates() {
    let (template, driver) = setup();
    template.insert(grace()).await.unwrap();

    let renamed = Person {
        name: Some("Grace Hopper".to_string()),
        ..grace()
    };
    let stored = template.update_entity(renamed.clone()).await.unwrap();
    assert_eq!(stored, renamed);
    assert!(matches!(driver.log().last(), Some(Op::Update(_))));

    let updated = template
        .update::<Person>()
        .set("age")
        .to(86)
        .filter("name")
        .eq("Grace Hopper")
        .execute()
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let found = template.find_by_id::<Person>(2_i64).await.unwrap();
    assert_eq!(found.and_then(|p| p.age), Some(86));
}

#[tokio::test]
async fn driver_failures_propagate() {
    let (template, driver) = setup();
    template.insert(grace()).await.unwrap();

    driver.fail_next(Error::driver_timeout("Person", Duration::from_secs(2)));
    let err = template.find_all::<Person>().await.unwrap_err();
    assert!(err.is_driver_timeout());
    assert_eq!(err.driver_entity(), Some("Person"));

    driver.fail_next(Error::driver_cancelled("Person"));
    let err = template.update_entity(grace()).await.unwrap_err();
    assert!(err.is_driver_cancelled());

    assert_eq!(template.find_all::<Person>().await.unwrap(), [grace()]);
}

#[tokio::test]
async fn delete_by_id_and_delete_all() {
    let (template, driver) = setup();

    template.insert(grace()).await.unwrap();
    template
        .insert(Person {
            id: Some(1),
            ..Person::default()
        })
        .await
        .unwrap();

    template.delete_by_id::<Person>(2_i64).await.unwrap();
    assert_eq!(driver.stored("Person").len(), 1);
    assert_eq!(
        driver.log().last_delete().unwrap().condition,
        Some(CriteriaCondition::eq("_id", 2_i64))
    );

    template.delete_all::<Person>().await.unwrap();
    assert!(driver.stored("Person").is_empty());
    assert_eq!(driver.log().last_delete().unwrap().condition, None);
}

#[tokio::test]
async fn time_to_live() {
    let (template, driver) = setup();

    template
        .insert_with_ttl(grace(), Duration::from_secs(60))
        .await
        .unwrap();

    assert!(matches!(
        driver.log().last(),
        Some(Op::Insert { ttl: Some(ttl), .. }) if ttl == Duration::from_secs(60)
    ));

    let plain = Template::builder()
        .driver(MemoryDriver::with_capability(&PLAIN))
        .registry(registry())
        .build()
        .unwrap();

    let res = plain.insert_with_ttl(grace(), Duration::from_secs(60)).await;
    assert_err!(res, is_unsupported_operation);
}

#[tokio::test]
async fn stream_reads_lazily() {
    let (template, driver) = setup();

    template.insert(grace()).await.unwrap();
    template
        .insert(Person {
            id: Some(1),
            name: Some("Ada".to_string()),
            ..Person::default()
        })
        .await
        .unwrap();

    let mut stream = template
        .stream::<Person>(SelectQuery::new("Person").sort(Sort::asc("name")))
        .await
        .unwrap();

    let mut names = vec![];
    while let Some(person) = stream.next().await {
        names.extend(person.unwrap().name);
    }

    assert_eq!(names, ["Ada", "Grace"]);
    assert_eq!(driver.log().count(|op| matches!(op, Op::Select(_))), 1);
}

#[tokio::test]
async fn missing_collaborators_fail_to_build() {
    let res = Template::builder().registry(registry()).build();
    assert_err!(res, is_null_argument);

    let res = Template::builder().driver(MemoryDriver::new()).build();
    assert_err!(res, is_null_argument);
}

#[tokio::test]
async fn unregistered_types_are_rejected() {
    #[derive(Debug, Clone, Default, PartialEq, semimap::Model)]
    struct Stray {
        #[id]
        id: i64,
    }

    let (template, _) = setup();

    let res = template.insert(Stray { id: 1 }).await;
    assert_err!(res, is_class_information_not_found);
}

#[derive(Debug, Default, Clone)]
struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl EventHooks for Recorder {
    fn pre_persist(&self, model: &dyn Model) {
        self.push(format!("pre_persist {}", model.type_key().simple_name()));
    }

    fn pre_entity(&self, entity: &CommunicationEntity) {
        self.push(format!("pre_entity {}", entity.len()));
    }

    fn post_entity(&self, entity: &CommunicationEntity) {
        self.push(format!("post_entity {}", entity.name()));
    }

    fn post_persist(&self, model: &dyn Model) {
        let name = model
            .downcast_ref::<Person>()
            .and_then(|person| person.name.clone())
            .unwrap_or_default();

        self.push(format!("post_persist {name}"));
    }
}

#[tokio::test]
async fn hooks_fire_around_writes() {
    let recorder = Recorder::default();
    let (template, _) = setup_with_events(recorder.clone());

    template.insert(grace()).await.unwrap();

    assert_eq!(
        recorder.take(),
        [
            "pre_persist Person",
            "pre_entity 3",
            "post_entity Person",
            "post_persist Grace",
        ]
    );

    template.find_by_id::<Person>(2_i64).await.unwrap();
    assert!(recorder.take().is_empty());

    template.update_entity(grace()).await.unwrap();
    assert_eq!(recorder.take().len(), 4);
}
