mod common;

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::json;
use sigep_adapters::models::TipoPermiso;
use sigep_adapters::testing::ScriptedGateway;
use sigep_adapters::{endpoints, GatewayError, Method};
use sigep_console::screens::inbox::{InboxScreen, LOAD_FAILED};
use sigep_console::screens::my_requests::{LeaveForm, MyRequestsScreen};
use sigep_console::screens::{Level, Notice};
use sigep_console::services::approval::ViewCapability;
use sigep_console::services::attachments::Attachment;

fn inbox(gateway: &Arc<ScriptedGateway>, roles: &[&str]) -> InboxScreen {
    InboxScreen::new(common::context(gateway, common::session(roles, Some(7))))
}

fn at(raw: &str) -> NaiveDateTime {
    raw.parse().unwrap()
}

#[tokio::test]
async fn rows_offer_actions_to_the_pending_signer_only() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.always(
        Method::Get,
        endpoints::SOLICITUDES,
        json!([
            common::solicitud(1, "PENDIENTE_APROBACION_JEFE"),
            common::solicitud(2, "PENDIENTE_AUTORIZACION_TH"),
            common::solicitud(3, "APROBADO"),
        ]),
    );

    let mut jefe = inbox(&gateway, &["ROLE_JEFE"]);
    jefe.activate().await.unwrap();
    let capabilities: Vec<ViewCapability> = jefe.solicitudes.iter().map(|s| jefe.capability(s)).collect();
    assert_eq!(
        capabilities,
        vec![ViewCapability::CanApproveOrReject, ViewCapability::NoAction, ViewCapability::NoAction]
    );

    let mut admin = inbox(&gateway, &["ROLE_ADMIN"]);
    admin.activate().await.unwrap();
    let actionable = admin
        .solicitudes
        .iter()
        .filter(|s| admin.capability(s).allows_action())
        .count();
    assert_eq!(actionable, 2);
}

#[tokio::test]
async fn approval_sends_the_acting_employee_and_refreshes() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway
        .respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(1, "PENDIENTE_APROBACION_JEFE")]))
        .respond(Method::Put, &endpoints::solicitud_aprobar(1), json!(null))
        .respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(1, "PENDIENTE_AUTORIZACION_TH")]));
    let mut screen = inbox(&gateway, &["ROLE_JEFE"]);
    screen.activate().await.unwrap();

    screen.approve(1).await.unwrap();

    let sent = gateway.requests_to(Method::Put, &endpoints::solicitud_aprobar(1));
    assert_eq!(sent[0].body, Some(json!({"ejecutadoPor": 7})));
    assert_eq!(screen.capability(&screen.solicitudes[0]), ViewCapability::NoAction);
}

#[tokio::test]
async fn approval_is_not_offered_out_of_turn() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(2, "PENDIENTE_AUTORIZACION_TH")]));
    let mut screen = inbox(&gateway, &["ROLE_JEFE"]);
    screen.activate().await.unwrap();

    assert!(screen.approve(2).await.is_err());
    assert!(gateway.requests_to(Method::Put, &endpoints::solicitud_aprobar(2)).is_empty());
    assert_eq!(screen.notices.last().map(|n| n.level), Some(Level::Warning));
}

#[tokio::test]
async fn rejection_needs_a_motive() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(1, "PENDIENTE_APROBACION_JEFE")]));
    let mut screen = inbox(&gateway, &["ROLE_JEFE"]);
    screen.activate().await.unwrap();

    screen.open_rejection(1);
    screen.set_motive("   ");
    assert!(screen.confirm_rejection().await.is_err());

    assert!(gateway.requests_to(Method::Put, &endpoints::solicitud_rechazar(1)).is_empty());
    assert_eq!(
        screen.notices.last(),
        Some(&Notice::new(Level::Warning, "Debe indicar un motivo de rechazo"))
    );
    assert!(screen.rejection.is_some());

    screen.set_motive("x".repeat(256));
    assert!(screen.confirm_rejection().await.is_err());
    assert!(gateway.requests_to(Method::Put, &endpoints::solicitud_rechazar(1)).is_empty());
}

#[tokio::test]
async fn rejection_sends_the_exact_motive_and_clears_the_draft() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway
        .respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(1, "PENDIENTE_APROBACION_JEFE")]))
        .respond(Method::Put, &endpoints::solicitud_rechazar(1), json!(null))
        .respond(Method::Get, endpoints::SOLICITUDES, json!([common::solicitud(1, "RECHAZADO_JEFE")]));
    let mut screen = inbox(&gateway, &["ROLE_JEFE"]);
    screen.activate().await.unwrap();

    screen.open_rejection(1);
    screen.set_motive(" Fechas cruzadas con el cierre ");
    screen.confirm_rejection().await.unwrap();

    let sent = gateway.requests_to(Method::Put, &endpoints::solicitud_rechazar(1));
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].body,
        Some(json!({"motivo": " Fechas cruzadas con el cierre ", "ejecutadoPor": 7}))
    );
    assert_eq!(screen.rejection, None);
    assert_eq!(screen.notices.all(), &[Notice::new(Level::Info, "Solicitud rechazada")]);
    assert!(screen.solicitudes[0].estado_solicitud.is_rejected());
}

#[tokio::test]
async fn inbox_failure_leaves_an_empty_table() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.fail(Method::Get, endpoints::SOLICITUDES, || GatewayError::from_status(502, None));
    let mut screen = inbox(&gateway, &["ROLE_TH"]);

    assert!(screen.activate().await.is_err());
    assert!(screen.solicitudes.is_empty());
    assert_eq!(screen.notices.all(), &[Notice::new(Level::Error, LOAD_FAILED)]);
}

#[tokio::test]
async fn evidence_is_decoded_or_reported_missing() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut with_pdf = common::solicitud(1, "PENDIENTE_AUTORIZACION_TH");
    with_pdf["evidenciaBase64"] = json!("data:application/pdf;base64,JVBERi0xLjQ=");
    gateway.respond(
        Method::Get,
        endpoints::SOLICITUDES,
        json!([with_pdf, common::solicitud(2, "PENDIENTE_AUTORIZACION_TH")]),
    );
    let mut screen = inbox(&gateway, &["ROLE_TH"]);
    screen.activate().await.unwrap();

    assert_eq!(screen.evidence(1).unwrap().bytes, b"%PDF-1.4");
    assert!(screen.evidence(2).is_err());
    assert_eq!(
        screen.notices.last(),
        Some(&Notice::new(Level::Warning, "Sin archivo adjunto"))
    );
}

#[tokio::test]
async fn own_requests_use_the_session_employee() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.respond(
        Method::Get,
        &endpoints::solicitudes_empleado(7),
        json!([common::solicitud(4, "PENDIENTE_APROBACION_JEFE")]),
    );
    let mut screen = MyRequestsScreen::new(common::context(&gateway, common::session(&[], Some(7))));

    screen.activate().await.unwrap();
    assert_eq!(screen.solicitudes[0].estado_solicitud.label(), "Pendiente Jefe");

    let mut anonymous = MyRequestsScreen::new(common::context(&gateway, common::session(&[], None)));
    assert!(anonymous.activate().await.is_err());
    assert_eq!(gateway.requests().len(), 1);
}

#[tokio::test]
async fn new_request_formats_range_and_evidence() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway
        .respond(Method::Post, endpoints::SOLICITUDES, json!({"id": 9}))
        .always(Method::Get, &endpoints::solicitudes_empleado(7), json!([]));
    let mut screen = MyRequestsScreen::new(common::context(&gateway, common::session(&[], Some(7))));

    let form = LeaveForm {
        tipo: Some(TipoPermiso::IncapacidadMedica),
        inicio: Some(at("2026-10-20T08:00:00")),
        fin: Some(at("2026-10-22T17:30:00")),
        motivo: Some("Reposo".into()),
        evidencia: Some(Attachment::new("application/pdf", b"%PDF-1.4".to_vec())),
    };
    screen.create(form).await.unwrap();

    let sent = gateway.requests_to(Method::Post, endpoints::SOLICITUDES);
    assert_eq!(
        sent[0].body,
        Some(json!({
            "idEmpleado": 7,
            "tipo": "INCAPACIDAD_MEDICA",
            "fechaInicio": "2026-10-20T08:00:00",
            "fechaFin": "2026-10-22T17:30:00",
            "motivo": "Reposo",
            "evidenciaBase64": "data:application/pdf;base64,JVBERi0xLjQ="
        }))
    );
    assert_eq!(screen.notices.last(), Some(&Notice::new(Level::Success, "Solicitud enviada")));
}

#[tokio::test]
async fn new_request_rejects_inverted_range() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut screen = MyRequestsScreen::new(common::context(&gateway, common::session(&[], Some(7))));

    let form = LeaveForm {
        tipo: Some(TipoPermiso::Vacaciones),
        inicio: Some(at("2026-10-22T08:00:00")),
        fin: Some(at("2026-10-20T08:00:00")),
        motivo: Some("Viaje".into()),
        evidencia: None,
    };
    assert!(screen.create(form).await.is_err());
    assert!(gateway.requests().is_empty());
}
