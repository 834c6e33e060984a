use bipcard_portal::{BalanceForm, Endpoint, Form, MovementsForm};
use chrono::{TimeZone, Utc};

#[test]
fn balance_form_body() {
    let form = BalanceForm::new("123456789012");
    assert_eq!(form.endpoint(), Endpoint::Session);
    assert_eq!(
        form.to_form_body(),
        "accion=6&NumDistribuidor=99&NomUsuario=usuInternet&NomHost=AFT&NomDominio=aft.cl&Trx=&RutUsuario=0&NumTarjeta=123456789012&bloqueable="
    );
}

#[test]
fn balance_form_card_number_is_verbatim() {
    let form = BalanceForm::new("12 34");
    assert!(form.to_form_body().contains("&NumTarjeta=12 34&"));
}

#[test]
fn movements_form_body() {
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
    let form = MovementsForm::new("ABC123", at);
    assert_eq!(form.endpoint(), Endpoint::Commercial);
    assert_eq!(
        form.to_form_body(),
        "accion=1&KSI=ABC123&DiasMov=90&FechaInicioMovimientos=20240305&itemms=3000&item=2&fechalogeo=20240305070809&cboSeleccion=90"
    );
}

#[test]
fn movements_form_pads_single_digits() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let body = MovementsForm::new("k", at).to_form_body();
    assert!(body.contains("FechaInicioMovimientos=20250102&"));
    assert!(body.contains("fechalogeo=20250102030405&"));
}

#[test]
fn movements_form_now_uses_current_time() {
    let before = Utc::now();
    let form = MovementsForm::now("k");
    let after = Utc::now();
    assert!(form.requested_at() >= before && form.requested_at() <= after);
    assert_eq!(form.ksi(), "k");
}
