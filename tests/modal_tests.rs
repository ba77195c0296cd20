use leadboard::tui::board::KanbanBoard;
use leadboard::tui::modal::{self, AddLeadModal, FormField, LeadForm, ModalOperations};

fn typed(form: &mut LeadForm, text: &str) {
    for c in text.chars() {
        form.insert_char(c);
    }
}

// === AddLeadModal Tests ===

#[test]
fn test_modal_open_sets_title() {
    let mut modal = AddLeadModal::default();
    assert!(!modal.is_open());

    modal.open("Follow Up");

    assert!(modal.is_open());
    assert_eq!(modal.title(), "Add Follow Up Lead");

    modal.close();
    assert!(!modal.is_open());
}

// === LeadForm Tests ===

#[test]
fn test_form_field_cycle() {
    let mut field = FormField::Name;
    for _ in 0..FormField::all().len() {
        field = field.next();
    }
    assert_eq!(field, FormField::Name);
    assert_eq!(FormField::Name.prev(), FormField::Value);
}

#[test]
fn test_form_editing() {
    let mut form = LeadForm::default();
    typed(&mut form, "Sarh");
    form.cursor_left();
    form.insert_char('a');
    assert_eq!(form.fields.name, "Sarah");

    form.cursor_home();
    form.delete();
    assert_eq!(form.fields.name, "arah");
    form.cursor_end();
    assert_eq!(form.cursor, 4);
    form.backspace();
    assert_eq!(form.fields.name, "ara");
}

#[test]
fn test_form_multibyte_editing() {
    let mut form = LeadForm::default();
    typed(&mut form, "Zoë");
    form.backspace();
    typed(&mut form, "é");
    assert_eq!(form.fields.name, "Zoé");
    assert_eq!(form.cursor, 3);
}

#[test]
fn test_form_value_field_filters_input() {
    let mut form = LeadForm::default();
    form.focus = FormField::Value;

    typed(&mut form, "$1,2a00.50");

    assert_eq!(form.fields.value, "1,200.50");
}

#[test]
fn test_form_focus_moves_cursor_to_end() {
    let mut form = LeadForm::default();
    typed(&mut form, "Ann");
    form.focus_next();
    assert_eq!(form.focus, FormField::Company);
    assert_eq!(form.cursor, 0);

    form.focus_prev();
    assert_eq!(form.cursor, 3);
}

// === open / submit ===

#[test]
fn test_open_add_lead_clears_form() {
    let board = KanbanBoard::default();
    let mut form = LeadForm::default();
    let mut dialog = AddLeadModal::default();
    typed(&mut form, "leftover");
    form.error = Some("old".to_string());

    modal::open_add_lead(&board, 3, &mut form, &mut dialog);

    assert_eq!(form.target, 3);
    assert!(form.fields.name.is_empty());
    assert!(form.error.is_none());
    assert_eq!(dialog.title(), "Add Won Lead");
}

#[test]
fn test_open_add_lead_unknown_column_keeps_dialog_closed() {
    let board = KanbanBoard::default();
    let mut form = LeadForm::default();
    let mut dialog = AddLeadModal::default();

    modal::open_add_lead(&board, 12, &mut form, &mut dialog);

    assert!(!dialog.is_open());
}

#[test]
fn test_submit_lead_success_closes_dialog() {
    let mut board = KanbanBoard::default();
    let mut form = LeadForm::default();
    let mut dialog = AddLeadModal::default();
    modal::open_add_lead(&board, 1, &mut form, &mut dialog);
    form.fields.name = "Elena".to_string();
    form.fields.company = "Coastal Coffee".to_string();
    form.fields.value = "850".to_string();

    let id = modal::submit_lead(&mut board, &mut form, &mut dialog).unwrap();

    assert!(!dialog.is_open());
    assert!(form.fields.name.is_empty());
    let card = board.card(&id).unwrap();
    assert_eq!(card.status.as_str(), "Follow Up");
    assert_eq!(card.value.as_ref().unwrap().to_string(), "$850");
}

#[test]
fn test_submit_lead_failure_keeps_dialog_open() {
    let mut board = KanbanBoard::default();
    let mut form = LeadForm::default();
    let mut dialog = AddLeadModal::default();
    modal::open_add_lead(&board, 0, &mut form, &mut dialog);
    form.fields.company = "Nameless Ltd".to_string();

    let err = modal::submit_lead(&mut board, &mut form, &mut dialog).unwrap_err();

    assert!(err.is_validation());
    assert!(dialog.is_open());
    assert_eq!(form.error.as_deref(), Some("Name & Company required"));
    assert_eq!(form.fields.company, "Nameless Ltd");
    assert_eq!(board.card_count(), 0);
}

/// Run with: cargo test --features test-mocks
#[cfg(feature = "test-mocks")]
mod mocked {
    use super::*;
    use leadboard::tui::modal::MockModalOperations;
    use mockall::predicate::eq;

    #[test]
    fn test_open_add_lead_passes_column_label() {
        let board = KanbanBoard::default();
        let mut form = LeadForm::default();
        let mut mock_modal = MockModalOperations::new();
        mock_modal.expect_open().with(eq("Prospect")).times(1).return_const(());

        modal::open_add_lead(&board, 2, &mut form, &mut mock_modal);

        assert_eq!(form.target, 2);
    }

    #[test]
    fn test_submit_lead_never_closes_on_validation_error() {
        let mut board = KanbanBoard::default();
        let mut form = LeadForm::default();
        let mut mock_modal = MockModalOperations::new();
        mock_modal.expect_close().times(0);

        assert!(modal::submit_lead(&mut board, &mut form, &mut mock_modal).is_err());
    }

    #[test]
    fn test_submit_lead_closes_once_on_success() {
        let mut board = KanbanBoard::default();
        let mut form = LeadForm::default();
        form.fields.name = "Marcus".to_string();
        form.fields.company = "Peak Fitness".to_string();
        let mut mock_modal = MockModalOperations::new();
        mock_modal.expect_close().times(1).return_const(());

        modal::submit_lead(&mut board, &mut form, &mut mock_modal).unwrap();

        assert_eq!(board.cards_in_column(0).len(), 1);
    }
}
