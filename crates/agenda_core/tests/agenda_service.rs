use agenda_core::service::agenda_service::DATE_FORMAT_MESSAGE;
use agenda_core::{AgendaService, CsvAgendaRepository, Event, InMemoryAgendaRepository};
use chrono::NaiveDate;
use std::path::Path;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

fn csv_service(path: &Path) -> AgendaService<CsvAgendaRepository> {
    let repo = CsvAgendaRepository::try_new(path).unwrap();
    AgendaService::with_today(repo, today)
}

#[test]
fn add_then_list_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = csv_service(&dir.path().join("agenda.csv"));

    let message = service.add_new_event("Revisión", "2025-03-01", "09:00");
    assert_eq!(
        message,
        "¡Listo! He agendado: 'Revisión' para el 2025-03-01 a las 09:00."
    );
    assert_eq!(
        service.list_all_events(),
        vec![Event::new("Revisión", "2025-03-01", "09:00")]
    );
}

#[test]
fn far_future_event_is_rejected_and_store_stays_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agenda.csv");
    let service = csv_service(&path);

    let message = service.add_new_event("X", "2099-01-01", "10:00");
    assert_eq!(
        message,
        "⚠️ No puedes agendar eventos a más de un año en el futuro (Límite: 2026-01-10)."
    );
    assert!(service.list_all_events().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Evento,Fecha,Hora\n");
}

#[test]
fn far_future_event_is_rejected_with_real_clock() {
    let service = AgendaService::new(InMemoryAgendaRepository::new());
    let message = service.add_new_event("X", "2099-01-01", "10:00");
    assert!(message.contains("más de un año"), "{message}");
    assert!(service.list_all_events().is_empty());
}

#[test]
fn malformed_dates_leave_storage_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agenda.csv");
    let service = csv_service(&path);
    service.add_new_event("Base", "2025-02-01", "08:00");
    let before = std::fs::read(&path).unwrap();

    for bad in ["01/03/2025", "2025-13-01", "mañana", "2025-03-01T10:00"] {
        assert_eq!(service.add_new_event("A", bad, "10:00"), DATE_FORMAT_MESSAGE);
    }
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn remove_event_with_date_keeps_other_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let service = csv_service(&dir.path().join("agenda.csv"));
    service.add_new_event("Reunión", "2025-03-01", "09:00");
    service.add_new_event("Reunión", "2025-03-08", "09:00");

    let message = service.remove_event("Reunión", Some("2025-03-01"));
    assert_eq!(message, "Se eliminó 1 evento 'Reunión' con éxito.");
    assert_eq!(
        service.list_all_events(),
        vec![Event::new("Reunión", "2025-03-08", "09:00")]
    );
}

#[test]
fn recurring_series_is_one_call_per_date() {
    let dir = tempfile::tempdir().unwrap();
    let service = csv_service(&dir.path().join("agenda.csv"));
    for date in ["2025-02-03", "2025-02-10", "2025-02-17"] {
        service.add_new_event("Yoga", date, "07:00");
    }

    assert_eq!(service.list_all_events().len(), 3);
    assert_eq!(service.list_events_by_date("2025-02-10").len(), 1);
    assert_eq!(
        service.remove_event("Yoga", None),
        "Se eliminaron 3 eventos 'Yoga' con éxito."
    );
}

#[test]
fn memory_and_csv_backends_agree() {
    let dir = tempfile::tempdir().unwrap();
    let csv = csv_service(&dir.path().join("agenda.csv"));
    let memory = AgendaService::with_today(InMemoryAgendaRepository::new(), today);

    for service_result in [
        (
            csv.add_new_event("Cita", "2025-04-01", "08:00"),
            memory.add_new_event("Cita", "2025-04-01", "08:00"),
        ),
        (
            csv.remove_event("Nada", None),
            memory.remove_event("Nada", None),
        ),
    ] {
        assert_eq!(service_result.0, service_result.1);
    }
    assert_eq!(csv.list_all_events(), memory.list_all_events());
    assert_eq!(
        csv.list_events_by_date("2025-04-01"),
        memory.list_events_by_date("2025-04-01")
    );
}

#[test]
fn file_backed_service_can_live_in_shared_state() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AgendaService<CsvAgendaRepository>>();

    let dir = tempfile::tempdir().unwrap();
    let service = std::sync::Arc::new(csv_service(&dir.path().join("agenda.csv")));
    let worker = {
        let service = std::sync::Arc::clone(&service);
        std::thread::spawn(move || service.add_new_event("Cita", "2025-04-01", "08:00"))
    };
    assert!(worker.join().unwrap().starts_with("¡Listo!"));
    assert_eq!(service.list_all_events().len(), 1);
}
