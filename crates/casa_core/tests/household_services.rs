use casa_core::{
    BetBoard, BetDraft, CalendarBook, CategorySelection, DateKey, EventDraft, ItemDraft,
    KeyValueStore, MemoryKvStore, Motivation, NewTask, NoteDraft, Person, PersonalBoard,
    Persistence, Pet, PetNotes, PharmacyList, SaveOutcome, ShoppingCategory, ShoppingList,
    SliceStore, StatusFilter, TaskBoard, TaskFilter, ValidationError, YearMonth,
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn direct_store() -> (Arc<MemoryKvStore>, Persistence) {
    let kv = Arc::new(MemoryKvStore::new());
    let persistence = Persistence::Direct(SliceStore::new(kv.clone()));
    (kv, persistence)
}

fn new_task(title: &str, category: &str, responsible: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        category: category.to_string(),
        responsible: responsible.to_string(),
        due_date: String::new(),
    }
}

fn item(name: &str, category: ShoppingCategory) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        quantity: "1".to_string(),
        category,
        ..ItemDraft::default()
    }
}

#[test]
fn toggling_a_task_twice_restores_it_and_persists_each_step() {
    let (kv, persistence) = direct_store();
    let mut board = TaskBoard::open(persistence);
    let id = board
        .add_task(new_task("Lavar louça", "Cozinha", "Vander"))
        .unwrap();
    let second = board
        .add_task(new_task("Regar plantas", "Jardim", "Amanda"))
        .unwrap();
    let third = board
        .add_task(new_task("Tirar o lixo", "Limpeza", "Guilherme"))
        .unwrap();
    let untouched = vec![
        board.get(&second).unwrap().clone(),
        board.get(&third).unwrap().clone(),
    ];

    assert_eq!(board.toggle_task(&id), Some(true));
    assert!(kv.get("tarefas").unwrap().unwrap().contains("\"completed\":true"));
    assert_eq!(board.toggle_task(&id), Some(false));
    assert!(!board.get(&id).unwrap().completed);
    assert!(!kv.get("tarefas").unwrap().unwrap().contains("\"completed\":true"));

    assert_eq!(&board.tasks()[1..], untouched.as_slice());
    let reopened = TaskBoard::open(Persistence::Direct(SliceStore::new(kv)));
    assert_eq!(&reopened.tasks()[1..], untouched.as_slice());
}

#[test]
fn stored_tasks_missing_optional_fields_still_load() {
    let (kv, persistence) = direct_store();
    kv.set(
        "tarefas",
        r#"[{"id":"1","title":"Varrer","category":"Limpeza","responsible":"Amanda"},
            {"id":"2","title":"Lavar","category":"Cozinha","responsible":"Vander","dueDate":"sexta","completed":true}]"#,
    )
    .unwrap();

    let mut board = TaskBoard::open(persistence);
    assert_eq!(board.tasks().len(), 2);
    assert_eq!(board.get("1").unwrap().due_date, "");
    assert!(!board.get("1").unwrap().completed);

    board
        .add_task(new_task("Passar roupa", "Limpeza", "Amanda"))
        .unwrap();
    let reopened = TaskBoard::open(Persistence::Direct(SliceStore::new(kv)));
    assert_eq!(reopened.tasks().len(), 3);
}

#[test]
fn store_outage_during_load_keeps_stored_tasks_intact() {
    let (kv, persistence) = direct_store();
    let stored = r#"[{"id":"1","title":"Varrer","category":"Limpeza","responsible":"Amanda","dueDate":"","completed":false}]"#;
    kv.set("tarefas", stored).unwrap();
    kv.set_unavailable(true);
    let mut board = TaskBoard::open(persistence);
    kv.set_unavailable(false);

    assert!(board.slice().load_failure().is_some());
    board
        .add_task(new_task("Passar roupa", "Limpeza", "Amanda"))
        .unwrap();

    assert!(matches!(
        board.slice().last_save(),
        Some(SaveOutcome::StoreFailed(_))
    ));
    assert_eq!(kv.get("tarefas").unwrap().as_deref(), Some(stored));
}

#[test]
fn new_ids_sort_after_ids_already_stored() {
    let (kv, persistence) = direct_store();
    let ahead_of_clock = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
        + 60_000;
    kv.set(
        "tarefas",
        &format!(r#"[{{"id":"{ahead_of_clock}","title":"Varrer"}}]"#),
    )
    .unwrap();

    let mut board = TaskBoard::open(persistence);
    let id = board
        .add_task(new_task("Passar roupa", "Limpeza", "Amanda"))
        .unwrap();

    assert!(id.parse::<u64>().unwrap() > ahead_of_clock);
}

#[test]
fn deleting_a_task_keeps_the_order_of_the_rest() {
    let (kv, persistence) = direct_store();
    let mut board = TaskBoard::open(persistence);
    let a = board.add_task(new_task("A", "Limpeza", "Amanda")).unwrap();
    let b = board.add_task(new_task("B", "Limpeza", "Amanda")).unwrap();
    let c = board.add_task(new_task("C", "Limpeza", "Amanda")).unwrap();

    board.delete_task(&b).unwrap();

    let ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec![a.as_str(), c.as_str()]);

    let reopened = TaskBoard::open(Persistence::Direct(SliceStore::new(kv)));
    assert_eq!(reopened.tasks(), board.tasks());
}

#[test]
fn task_edits_on_unknown_ids_change_nothing() {
    let (kv, persistence) = direct_store();
    let mut board = TaskBoard::open(persistence);

    assert_eq!(board.toggle_task("missing"), None);
    assert_eq!(board.delete_task("missing"), None);
    assert_eq!(kv.get("tarefas").unwrap(), None);
}

#[test]
fn blank_task_title_is_rejected() {
    let (_, persistence) = direct_store();
    let mut board = TaskBoard::open(persistence);

    assert_eq!(
        board.add_task(new_task("  ", "Limpeza", "Amanda")),
        Err(ValidationError::EmptyField("title"))
    );
    assert!(board.tasks().is_empty());
}

#[test]
fn task_filter_combines_search_owner_and_status() {
    let mut board = TaskBoard::open(Persistence::InMemory);
    let dishes = board
        .add_task(new_task("Lavar louça", "Cozinha", "Vander"))
        .unwrap();
    board
        .add_task(new_task("Lavar roupa", "Limpeza", "Renata"))
        .unwrap();
    board
        .add_task(new_task("Comprar pão", "Compras", "Vander"))
        .unwrap();
    board.toggle_task(&dishes);

    let filter = TaskFilter {
        search: "LAVAR".to_string(),
        responsible: Some("Vander".to_string()),
        status: StatusFilter::Completed,
        ..TaskFilter::default()
    };
    let found: Vec<&str> = board
        .filter(&filter)
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(found, vec!["Lavar louça"]);
    assert_eq!(board.filter(&TaskFilter::default()).len(), 3);
}

#[test]
fn shopping_trip_completes_only_when_selection_is_fully_collected() {
    let (_, persistence) = direct_store();
    let mut list = ShoppingList::open(persistence);
    let rice = list.save_item(item("Arroz", ShoppingCategory::Monthly)).unwrap();
    let bread = list.save_item(item("Pão", ShoppingCategory::Weekly)).unwrap();

    let monthly = CategorySelection::only([ShoppingCategory::Monthly]);
    let outcome = list.toggle_collected(&rice, &monthly);
    assert!(outcome.found);
    assert!(outcome.trip_complete);

    let everything = CategorySelection::default();
    assert!(!list.is_trip_complete(&everything));
    assert_eq!(list.items_to_shop(&everything).len(), 1);
    assert!(list.toggle_collected(&bread, &everything).trip_complete);

    let as_needed = CategorySelection::only([ShoppingCategory::AsNeeded]);
    assert!(!list.is_trip_complete(&as_needed));
}

#[test]
fn resetting_a_trip_clears_only_the_selected_categories() {
    let (kv, persistence) = direct_store();
    let mut list = ShoppingList::open(persistence);
    let rice = list.save_item(item("Arroz", ShoppingCategory::Monthly)).unwrap();
    let bread = list.save_item(item("Pão", ShoppingCategory::Weekly)).unwrap();
    let milk = list.save_item(item("Leite", ShoppingCategory::Weekly)).unwrap();
    let everything = CategorySelection::default();
    for id in [&rice, &bread, &milk] {
        list.toggle_collected(id, &everything);
    }

    let weekly = CategorySelection::only([ShoppingCategory::Weekly]);
    assert_eq!(list.items_collected(&weekly).len(), 2);
    assert_eq!(list.reset_collected(&weekly), 2);

    let collected: Vec<bool> = list.items().iter().map(|item| item.collected).collect();
    assert_eq!(collected, vec![true, false, false]);
    assert_eq!(list.items_to_shop(&weekly).len(), 2);
    let reopened = ShoppingList::open(Persistence::Direct(SliceStore::new(kv)));
    assert_eq!(reopened.items(), list.items());

    assert_eq!(list.reset_collected(&weekly), 0);
}

#[test]
fn shopping_item_edit_keeps_collected_flag_and_position() {
    let (kv, persistence) = direct_store();
    let mut list = ShoppingList::open(persistence);
    let first = list.save_item(item("Feijão", ShoppingCategory::Weekly)).unwrap();
    list.save_item(item("Café", ShoppingCategory::Weekly)).unwrap();
    list.toggle_collected(&first, &CategorySelection::default());

    let edited = list.save_item(ItemDraft {
        id: Some(first.clone()),
        name: "Feijão preto".to_string(),
        quantity: "2kg".to_string(),
        category: ShoppingCategory::Monthly,
    });

    assert_eq!(edited.as_deref(), Some(first.as_str()));
    let stored = &list.items()[0];
    assert_eq!(stored.name, "Feijão preto");
    assert!(stored.collected);
    assert!(kv
        .get("itens_mercado")
        .unwrap()
        .unwrap()
        .contains("Compra do mês"));
    assert_eq!(list.save_item(item("   ", ShoppingCategory::Weekly)), None);
}

#[test]
fn pharmacy_list_saves_and_deletes() {
    let (kv, persistence) = direct_store();
    let mut list = PharmacyList::open(persistence);
    let id = list
        .save_item(ItemDraft {
            name: "Dipirona".to_string(),
            quantity: "1 caixa".to_string(),
            ..ItemDraft::default()
        })
        .unwrap();

    assert_eq!(list.delete_item(&id).map(|item| item.name), Some("Dipirona".to_string()));
    assert_eq!(kv.get("itens_farmacia").unwrap().as_deref(), Some("[]"));
}

#[test]
fn pet_notes_stay_with_their_pet() {
    let (kv, persistence) = direct_store();
    let mut notes = PetNotes::open(persistence);
    let id = notes
        .save_note(
            Pet::Sansa,
            NoteDraft {
                subject: "Vermífugo".to_string(),
                date: "12/05".to_string(),
                ..NoteDraft::default()
            },
        )
        .unwrap();

    assert_eq!(notes.notes(Pet::Sansa).len(), 1);
    assert!(notes.notes(Pet::Arya).is_empty());
    assert_eq!(notes.save_note(Pet::Stan, NoteDraft::default()), None);

    let reopened = PetNotes::open(Persistence::Direct(SliceStore::new(kv)));
    assert_eq!(reopened.notes(Pet::Sansa)[0].id, id);
    assert!(notes.delete_note(Pet::Arya, &id).is_none());
    assert!(notes.delete_note(Pet::Sansa, &id).is_some());
}

#[test]
fn bets_are_newest_first_and_removed_on_finalize() {
    let (kv, persistence) = direct_store();
    let mut board = BetBoard::open(persistence);
    let day = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let draft = |home: &str| BetDraft {
        championship: "Brasileirão".to_string(),
        home_team: home.to_string(),
        away_team: "Santos".to_string(),
        home_goals: "2".to_string(),
        away_goals: "1x".to_string(),
    };

    let first = board.place_bet_on(draft("Palmeiras"), day).unwrap();
    let second = board.place_bet_on(draft("Corinthians"), day).unwrap();

    assert_eq!(board.bets()[0].id, second);
    assert_eq!(board.bets()[1].created_on, "08/03/2026");
    assert_eq!(board.bets()[1].away_goals, "1");
    assert!(second > first);

    board.finalize_bet(first).unwrap();
    let raw = kv.get("apostas").unwrap().unwrap();
    assert!(raw.contains("\"timeCasa\":\"Corinthians\""));
    assert!(!raw.contains("Palmeiras"));
}

#[test]
fn bet_without_digits_in_score_is_rejected() {
    let mut board = BetBoard::open(Persistence::InMemory);
    let result = board.place_bet(BetDraft {
        championship: "Copa".to_string(),
        home_team: "A".to_string(),
        away_team: "B".to_string(),
        home_goals: "x".to_string(),
        away_goals: "0".to_string(),
    });

    assert_eq!(result, Err(ValidationError::InvalidScore("golCasa")));
    assert!(board.bets().is_empty());
}

#[test]
fn calendar_edit_keeps_event_date() {
    let (_, persistence) = direct_store();
    let mut book = CalendarBook::open(persistence);
    let date = DateKey::parse("07/01/2026").unwrap();
    let id = book
        .save_event(
            date,
            EventDraft {
                title: "Dentista".to_string(),
                time: "09:30".to_string(),
                ..EventDraft::default()
            },
        )
        .unwrap();

    let other_day = DateKey::parse("20/01/2026").unwrap();
    book.save_event(
        other_day,
        EventDraft {
            id: Some(id.clone()),
            title: "Dentista (retorno)".to_string(),
            ..EventDraft::default()
        },
    )
    .unwrap();

    assert_eq!(book.events_on(date).len(), 1);
    assert!(book.events_on(other_day).is_empty());
    assert_eq!(book.events()[0].title, "Dentista (retorno)");
}

#[test]
fn month_view_lists_events_and_marks_today() {
    let mut book = CalendarBook::open(Persistence::InMemory);
    for text in ["15/03/2026", "03/03/2026", "01/04/2026"] {
        book.save_event(
            DateKey::parse(text).unwrap(),
            EventDraft {
                title: format!("evento {text}"),
                ..EventDraft::default()
            },
        );
    }

    let march = YearMonth::new(2026, 3).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    let view = book.month_view(march, today);

    let dates: Vec<&str> = view.events.iter().map(|event| event.date.as_str()).collect();
    assert_eq!(dates, vec!["03/03/2026", "15/03/2026"]);
    let marked: Vec<u32> = view
        .cells
        .iter()
        .flatten()
        .filter(|cell| cell.is_today)
        .map(|cell| cell.day)
        .collect();
    assert_eq!(marked, vec![3]);
}

#[test]
fn personal_board_tracks_progress_tiers() {
    let mut board = PersonalBoard::in_memory(Person::Renata);
    assert_eq!(board.motivation(), Motivation::Idle);

    let ids: Vec<String> = ["Ler", "Correr", "Estudar", "Meditar"]
        .into_iter()
        .map(|title| board.save_task(None, title.to_string()).unwrap())
        .collect();
    assert_eq!(board.motivation(), Motivation::GettingStarted);

    board.toggle_task(&ids[0]);
    board.toggle_task(&ids[1]);
    assert_eq!(board.motivation(), Motivation::Halfway);

    board.toggle_task(&ids[2]);
    let progress = board.progress();
    assert_eq!((progress.completed, progress.pending), (3, 1));
    assert_eq!(progress.percentage, 75.0);
    assert_eq!(board.motivation(), Motivation::AlmostThere);

    board.delete_task(&ids[3]);
    assert_eq!(board.motivation(), Motivation::AllDone);
}

#[test]
fn personal_board_is_memory_only_unless_opted_in() {
    let (kv, persistence) = direct_store();
    {
        let mut board = PersonalBoard::in_memory(Person::Amanda);
        board.save_task(None, "Yoga".to_string());
    }
    assert_eq!(kv.keys().unwrap(), Vec::<String>::new());

    let mut board = PersonalBoard::open(Person::Amanda, persistence.clone());
    board.save_note(NoteDraft {
        subject: "Reunião escola".to_string(),
        ..NoteDraft::default()
    });
    assert_eq!(kv.keys().unwrap(), vec!["pessoal_amanda_notas".to_string()]);

    let reopened = PersonalBoard::open(Person::Amanda, persistence);
    assert_eq!(reopened.notes().len(), 1);
    assert!(reopened.tasks().is_empty());
}
