use tests::prelude::*;

use indexmap::IndexMap;
use semimap::schema::TypeKey;
use std::collections::HashMap;

fn ada() -> Person {
    Person {
        id: Some(1),
        name: Some("Ada".to_string()),
        age: Some(36),
        address: Some(Address {
            street: Some("12 St James Sq".to_string()),
            city: Some("London".to_string()),
        }),
        job: Some(Job {
            title: "Analyst".to_string(),
            salary: 1200.5,
        }),
    }
}

fn library() -> Library {
    Library {
        id: "lib-1".to_string(),
        books: vec![
            Book {
                title: "Dune".to_string(),
                pages: 412,
                isbn: Some("978-0441013593".to_string()),
            },
            Book {
                title: "Solaris".to_string(),
                pages: 204,
                isbn: None,
            },
        ],
        tags: vec!["sf".to_string(), "classic".to_string()],
        scores: [3, 5, 4],
        ratings: IndexMap::from([("dune".to_string(), 5), ("solaris".to_string(), 4)]),
        owner: Some(Owner {
            name: "Ursula".to_string(),
            email: "ursula@example.com".to_string(),
        }),
        budget: Some(Money::new(1250, "USD")),
    }
}

#[test]
fn only_set_fields_are_written() {
    let (template, _) = setup();

    let person = Person {
        name: Some("Ada".to_string()),
        ..Person::default()
    };

    let entity = template.converter().to_communication(&person).unwrap();

    assert_eq!(entity.name(), "Person");
    assert_eq!(entity.len(), 1);
    assert_eq!(entity.find_value("name"), Some(&Value::from("Ada")));
}

#[test]
fn embedded_fields_are_flat_and_nested_fields_are_wrapped() {
    let (template, _) = setup();

    let entity = template.converter().to_communication(&ada()).unwrap();

    assert_eq!(
        entity.names().collect::<Vec<_>>(),
        ["_id", "name", "age", "street", "city", "work"]
    );
    assert_eq!(entity.find_value("_id"), Some(&Value::I64(1)));
    assert_eq!(entity.find_value("city"), Some(&Value::from("London")));

    let work = entity.find_value("work").and_then(Value::as_entity).unwrap();
    assert_eq!(
        work,
        [
            Element::new("title", "Analyst"),
            Element::new("salary", 1200.5),
        ]
    );

    assert_eq!(entity.find_path("work.title"), Some(&Value::from("Analyst")));
}

#[test]
fn person_round_trip() {
    let (template, _) = setup();
    let converter = template.converter();

    let entity = converter.to_communication(&ada()).unwrap();
    let person: Person = converter.to_entity(&entity).unwrap();

    assert_eq!(person, ada());
}

#[test]
fn library_round_trip() {
    let (template, _) = setup();
    let converter = template.converter();

    let entity = converter.to_communication(&library()).unwrap();

    assert_eq!(entity.find_value("budget"), Some(&Value::from("1250 USD")));
    assert_eq!(
        entity.find_value("scores"),
        Some(&Value::List(vec![Value::I32(3), Value::I32(5), Value::I32(4)]))
    );
    assert_eq!(entity.find_path("owner.mail"), Some(&Value::from("ursula@example.com")));

    let books = entity.find_value("books").and_then(Value::as_list).unwrap();
    assert_eq!(books.len(), 2);
    assert!(books.iter().all(Value::is_entity));

    let read: Library = converter.to_entity(&entity).unwrap();
    pretty_assertions::assert_eq!(read, library());
}

#[test]
fn map_of_embeddable() {
    let (template, _) = setup();
    let converter = template.converter();

    let computer = Computer {
        name: "Deep Thought".to_string(),
        programs: HashMap::from([
            (
                "chat".to_string(),
                Program {
                    name: "Chat".to_string(),
                    social_media: "@chat".to_string(),
                },
            ),
            (
                "mail".to_string(),
                Program {
                    name: "Mail".to_string(),
                    social_media: "@mail".to_string(),
                },
            ),
        ]),
    };

    let entity = converter.to_communication(&computer).unwrap();
    assert_eq!(entity.len(), 2);

    let programs = entity.find_value("programs").and_then(Value::as_entity).unwrap();
    assert_eq!(programs.len(), 2);

    for program in programs {
        let fields = program.value().as_entity().unwrap();
        let names: Vec<_> = fields.iter().map(Element::name).collect();
        assert_eq!(names, ["_id", "socialMedia"]);
    }

    assert_eq!(
        entity.find_path("programs.chat.socialMedia"),
        Some(&Value::from("@chat"))
    );

    let read: Computer = converter.to_entity(&entity).unwrap();
    assert_eq!(read, computer);
}

#[test]
fn empty_entity_reads_as_default() {
    let (template, _) = setup();

    let person: Person = template
        .converter()
        .to_entity(&CommunicationEntity::new("Person"))
        .unwrap();

    assert_eq!(person, Person::default());
}

#[test]
fn null_elements_are_skipped() {
    let (template, _) = setup();

    let entity = CommunicationEntity::with_elements(
        "Person",
        vec![
            Element::new("_id", Value::Null),
            Element::new("name", Value::Null),
            Element::new("work", Value::Null),
        ],
    );

    let person: Person = template.converter().to_entity(&entity).unwrap();
    assert_eq!(person, Person::default());
}

#[test]
fn embedded_field_is_set_from_partial_columns() {
    let (template, _) = setup();

    let entity = CommunicationEntity::with_elements(
        "Person",
        vec![Element::new("name", "Ada"), Element::new("city", "London")],
    );

    let person: Person = template.converter().to_entity(&entity).unwrap();

    assert_eq!(
        person.address,
        Some(Address {
            street: None,
            city: Some("London".to_string()),
        })
    );
}

#[test]
fn stored_values_are_coerced_to_field_types() {
    let (template, _) = setup();

    let entity = CommunicationEntity::with_elements(
        "Person",
        vec![Element::new("_id", "42"), Element::new("age", 36_i64)],
    );

    let person: Person = template.converter().to_entity(&entity).unwrap();

    assert_eq!(person.id, Some(42));
    assert_eq!(person.age, Some(36));
}

#[test]
fn malformed_values_fail_conversion() {
    let (template, _) = setup();
    let converter = template.converter();

    let entity = CommunicationEntity::with_elements("Library", vec![Element::new("budget", "lots")]);
    assert_err!(converter.to_entity::<Library>(&entity), is_type_conversion);

    let entity = CommunicationEntity::with_elements("Computer", vec![Element::new("programs", 3)]);
    assert_err!(converter.to_entity::<Computer>(&entity), is_invalid_map_value_type);

    let entity = CommunicationEntity::with_elements("Library", vec![Element::new("books", "none")]);
    assert_err!(converter.to_entity::<Library>(&entity), is_unsupported_collection_type);
}

#[test]
fn fill_keeps_unmatched_fields() {
    let (template, _) = setup();

    let mut person = ada();
    let entity = CommunicationEntity::with_elements("Person", vec![Element::new("age", 37)]);

    template.converter().fill(&entity, &mut person).unwrap();

    assert_eq!(person.age, Some(37));
    assert_eq!(person.name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn writes_stamp_the_discriminator() {
    let (template, driver) = setup();

    template
        .insert(Dog {
            id: "rex".to_string(),
            name: "Rex".to_string(),
            breed: "Collie".to_string(),
        })
        .await
        .unwrap();

    template
        .insert(Cat {
            id: "tom".to_string(),
            name: "Tom".to_string(),
            lives: 9,
        })
        .await
        .unwrap();

    template
        .insert(Animal {
            id: "x".to_string(),
            name: "Unknown".to_string(),
        })
        .await
        .unwrap();

    let stored = driver.stored("Animal");
    let types: Vec<_> = stored.iter().map(|e| e.find_value("type").cloned()).collect();

    assert_eq!(
        types,
        [
            Some(Value::from("Dog")),
            Some(Value::from("cat")),
            Some(Value::from("Animal")),
        ]
    );
}

#[tokio::test]
async fn discriminator_selects_the_subtype() {
    let (template, driver) = setup();

    template
        .insert(Cat {
            id: "tom".to_string(),
            name: "Tom".to_string(),
            lives: 9,
        })
        .await
        .unwrap();

    let stored = driver.stored("Animal");
    let model = template
        .converter()
        .to_model(&stored[0], TypeKey::of::<Animal>())
        .unwrap();

    let cat = model.downcast_ref::<Cat>().unwrap();
    assert_eq!(cat.lives, 9);

    let unknown = CommunicationEntity::with_elements(
        "Animal",
        vec![Element::new("_id", "y"), Element::new("type", "Fish")],
    );

    assert_err!(
        template.converter().to_model(&unknown, TypeKey::of::<Animal>()),
        is_class_information_not_found
    );
}

#[test]
fn subtype_refuses_a_sibling_row() {
    let (template, _) = setup();

    let tom = CommunicationEntity::with_elements(
        "Animal",
        vec![
            Element::new("_id", "tom"),
            Element::new("name", "Tom"),
            Element::new("type", "cat"),
            Element::new("lives", 9),
        ],
    );

    assert_err!(
        template.converter().to_entity::<Dog>(&tom),
        is_class_information_not_found
    );

    let cat: Cat = template.converter().to_entity(&tom).unwrap();
    assert_eq!(cat.lives, 9);

    let animal: Animal = template.converter().to_entity(&tom).unwrap();
    assert_eq!(animal.name, "Tom");
}
