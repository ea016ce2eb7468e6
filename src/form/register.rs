//! Registration form: live password strength, field validation, duplicate
//! checks for email and nickname, and submit gating.

use secrecy::SecretString;

use super::field::{FieldAction, FieldStatus, SecretField, TextField};
use super::validators::{
    validate_confirm_password, validate_email, validate_new_password, validate_nickname,
    validate_phone, FieldError,
};
use super::{CheckState, CheckTicket, SubmitBlock, SubmitDecision, SUBMIT_DELAY};
use crate::duplicate::{CheckKind, CheckOutcome, DuplicateChecker};
use crate::evaluator::PasswordPolicy;
use crate::types::PasswordReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Email,
    Password,
    ConfirmPassword,
    Nickname,
    Phone,
}

impl RegisterField {
    /// Display order, used to pick the field that receives focus.
    pub const ALL: [RegisterField; 5] = [
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
        RegisterField::Nickname,
        RegisterField::Phone,
    ];
}

#[derive(Debug)]
pub struct RegisterForm {
    policy: PasswordPolicy,
    email: TextField,
    password: SecretField,
    confirm_password: SecretField,
    nickname: TextField,
    phone: TextField,
    report: PasswordReport,
    email_check: CheckState,
    nickname_check: CheckState,
    last_token: u64,
    submitting: bool,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new(PasswordPolicy::default())
    }
}

impl RegisterForm {
    pub fn new(policy: PasswordPolicy) -> Self {
        let password = SecretField::default();
        let report = policy.evaluate(&password.value);
        Self {
            policy,
            email: TextField::default(),
            password,
            confirm_password: SecretField::default(),
            nickname: TextField::default(),
            phone: TextField::default(),
            report,
            email_check: CheckState::Unchecked,
            nickname_check: CheckState::Unchecked,
            last_token: 0,
            submitting: false,
        }
    }

    // --- input events ---

    /// Typing in the email field invalidates any previous availability result.
    pub fn input_email(&mut self, value: impl Into<String>) {
        self.email.value = value.into();
        self.email.apply(FieldAction::Clear);
        self.email_check = CheckState::Unchecked;
    }

    /// Re-evaluates rules and strength on every keystroke.
    pub fn input_password(&mut self, value: SecretString) {
        self.password.value = value;
        self.password.apply(FieldAction::Clear);
        self.report = self.policy.evaluate(&self.password.value);
    }

    pub fn input_confirm_password(&mut self, value: SecretString) {
        self.confirm_password.value = value;
        self.confirm_password.apply(FieldAction::Clear);
    }

    pub fn input_nickname(&mut self, value: impl Into<String>) {
        self.nickname.value = value.into();
        self.nickname.apply(FieldAction::Clear);
        self.nickname_check = CheckState::Unchecked;
    }

    /// Stores the phone number through the `###-####-####` input mask.
    pub fn input_phone(&mut self, raw: &str) {
        self.phone.value = super::validators::format_phone_input(raw);
        self.phone.apply(FieldAction::Clear);
    }

    /// Validates a field when it loses focus.
    pub fn blur(&mut self, field: RegisterField) -> bool {
        self.validate_field(field)
    }

    /// Runs the field's validator and records the outcome. Returns validity.
    pub fn validate_field(&mut self, field: RegisterField) -> bool {
        let result = match field {
            RegisterField::Email => validate_email(&self.email.value),
            RegisterField::Password => validate_new_password(&self.password.value, &self.report.strength),
            RegisterField::ConfirmPassword => {
                validate_confirm_password(&self.password.value, &self.confirm_password.value)
            }
            RegisterField::Nickname => validate_nickname(&self.nickname.value),
            RegisterField::Phone => validate_phone(&self.phone.value),
        };
        let valid = result.is_ok();

        match field {
            RegisterField::Email => {
                self.email.apply(result.into());
                if !valid {
                    self.email_check = CheckState::Unchecked;
                }
            }
            RegisterField::Password => self.password.apply(result.into()),
            RegisterField::ConfirmPassword => self.confirm_password.apply(result.into()),
            RegisterField::Nickname => {
                self.nickname.apply(result.into());
                if !valid {
                    self.nickname_check = CheckState::Unchecked;
                }
            }
            RegisterField::Phone => {
                // Optional field: empty shows nothing at all
                let action = if self.phone.trimmed().is_empty() {
                    FieldAction::Clear
                } else {
                    result.into()
                };
                self.phone.apply(action);
            }
        }

        valid
    }

    // --- duplicate checks ---

    /// Validates the field and, if valid, marks a new request in flight.
    ///
    /// Returns `None` when the field is invalid. A ticket issued earlier for
    /// the same field becomes stale.
    pub fn begin_check(&mut self, kind: CheckKind) -> Option<CheckTicket> {
        let (field, value) = match kind {
            CheckKind::Email => (RegisterField::Email, self.email.trimmed().to_string()),
            CheckKind::Nickname => (RegisterField::Nickname, self.nickname.trimmed().to_string()),
        };
        if !self.validate_field(field) {
            return None;
        }

        self.last_token += 1;
        let token = self.last_token;
        *self.check_state_mut(kind) = CheckState::Pending(token);

        Some(CheckTicket { kind, value, token })
    }

    /// Applies a response if its ticket is still the pending one.
    ///
    /// Returns `false` for stale responses, which are dropped.
    pub fn complete_check(&mut self, ticket: &CheckTicket, outcome: CheckOutcome) -> bool {
        if *self.check_state(ticket.kind) != CheckState::Pending(ticket.token) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Discarding stale {} check response (token {})",
                ticket.kind.field(),
                ticket.token
            );
            return false;
        }

        let (state, action) = if outcome.success {
            (CheckState::Available(outcome.message), Some(FieldAction::Pass))
        } else if outcome.transport_failure {
            (CheckState::Failed(outcome.message), None)
        } else {
            let err = match ticket.kind {
                CheckKind::Email => FieldError::EmailTaken,
                CheckKind::Nickname => FieldError::NicknameTaken,
            };
            (CheckState::Taken(outcome.message), Some(FieldAction::Fail(err)))
        };

        if let Some(action) = action {
            match ticket.kind {
                CheckKind::Email => self.email.apply(action),
                CheckKind::Nickname => self.nickname.apply(action),
            }
        }
        *self.check_state_mut(ticket.kind) = state;
        true
    }

    /// Begin, query and complete in one blocking call.
    pub fn run_check<C: DuplicateChecker + ?Sized>(&mut self, kind: CheckKind, checker: &C) -> Option<CheckOutcome> {
        let ticket = self.begin_check(kind)?;
        let outcome = checker.check(kind, &ticket.value);
        self.complete_check(&ticket, outcome.clone());
        Some(outcome)
    }

    /// The check trigger is disabled while its request is in flight.
    pub fn check_in_flight(&self, kind: CheckKind) -> bool {
        self.check_state(kind).is_pending()
    }

    // --- submit ---

    /// Validates everything and decides whether the form may be submitted.
    pub fn submit(&mut self) -> SubmitDecision<RegisterField> {
        if self.submitting {
            return SubmitDecision::Blocked(SubmitBlock::AlreadySubmitting);
        }

        // Every field is validated so every error is displayed
        let invalid: Vec<_> = RegisterField::ALL
            .into_iter()
            .filter(|&field| !self.validate_field(field))
            .collect();

        let decision = if !invalid.is_empty() {
            SubmitDecision::Blocked(SubmitBlock::InvalidFields(invalid))
        } else if !self.email_check.is_available() {
            SubmitDecision::Blocked(SubmitBlock::EmailNotChecked)
        } else if !self.nickname_check.is_available() {
            SubmitDecision::Blocked(SubmitBlock::NicknameNotChecked)
        } else {
            self.submitting = true;
            SubmitDecision::Proceed { delay: SUBMIT_DELAY }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Register submit decision: {:?}", decision);

        decision
    }

    // --- accessors ---

    pub fn report(&self) -> &PasswordReport {
        &self.report
    }

    pub fn status(&self, field: RegisterField) -> &FieldStatus {
        match field {
            RegisterField::Email => &self.email.status,
            RegisterField::Password => &self.password.status,
            RegisterField::ConfirmPassword => &self.confirm_password.status,
            RegisterField::Nickname => &self.nickname.status,
            RegisterField::Phone => &self.phone.status,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone.value
    }

    pub fn check_state(&self, kind: CheckKind) -> &CheckState {
        match kind {
            CheckKind::Email => &self.email_check,
            CheckKind::Nickname => &self.nickname_check,
        }
    }

    fn check_state_mut(&mut self, kind: CheckKind) -> &mut CheckState {
        match kind {
            CheckKind::Email => &mut self.email_check,
            CheckKind::Nickname => &mut self.nickname_check,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrengthLevel;
    use std::cell::RefCell;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    /// Records queried values and answers from a fixed table.
    struct StubChecker {
        taken: Vec<&'static str>,
        fail: bool,
        calls: RefCell<Vec<(CheckKind, String)>>,
    }

    impl StubChecker {
        fn new(taken: Vec<&'static str>) -> Self {
            Self {
                taken,
                fail: false,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl DuplicateChecker for StubChecker {
        fn check(&self, kind: CheckKind, value: &str) -> CheckOutcome {
            self.calls.borrow_mut().push((kind, value.to_string()));
            if self.fail {
                CheckOutcome::failure()
            } else if self.taken.contains(&value) {
                CheckOutcome::taken("already in use")
            } else {
                CheckOutcome::available("available")
            }
        }
    }

    fn filled_form() -> RegisterForm {
        let mut form = RegisterForm::default();
        form.input_email(" kim@example.com ");
        form.input_password(secret("Zebra#Kite42"));
        form.input_confirm_password(secret("Zebra#Kite42"));
        form.input_nickname("neo");
        form
    }

    #[test]
    fn test_password_input_updates_report() {
        let mut form = RegisterForm::default();
        assert_eq!(form.report().strength.level, StrengthLevel::None);

        form.input_password(secret("zebra#kite"));
        assert_eq!(form.report().strength.score, 4.0);
        assert!(form.report().rules.special);
        assert!(!form.report().rules.uppercase);
    }

    #[test]
    fn test_weak_password_blocks() {
        let mut form = filled_form();
        form.input_password(secret("kite"));
        form.input_confirm_password(secret("kite"));

        assert!(!form.validate_field(RegisterField::Password));
        assert_eq!(
            form.status(RegisterField::Password).error(),
            Some(&FieldError::PasswordTooWeak("Weak"))
        );
    }

    #[test]
    fn test_blur_nickname_invalid() {
        let mut form = RegisterForm::default();
        form.input_nickname("n");
        assert!(!form.blur(RegisterField::Nickname));
        assert_eq!(
            form.status(RegisterField::Nickname).error(),
            Some(&FieldError::NicknameLength)
        );
    }

    #[test]
    fn test_phone_optional_and_masked() {
        let mut form = RegisterForm::default();
        assert!(form.blur(RegisterField::Phone));
        assert_eq!(form.status(RegisterField::Phone), &FieldStatus::Pristine);

        form.input_phone("01012345678");
        assert_eq!(form.phone(), "010-1234-5678");
        assert!(form.blur(RegisterField::Phone));
        assert!(form.status(RegisterField::Phone).is_success());

        form.input_phone("0101234");
        assert!(!form.blur(RegisterField::Phone));
    }

    #[test]
    fn test_check_invalid_email_sends_nothing() {
        let mut form = RegisterForm::default();
        form.input_email("not-an-email");
        let checker = StubChecker::new(vec![]);

        assert_eq!(form.run_check(CheckKind::Email, &checker), None);
        assert!(checker.calls.borrow().is_empty());
        assert_eq!(form.check_state(CheckKind::Email), &CheckState::Unchecked);
    }

    #[test]
    fn test_check_sends_trimmed_value() {
        let mut form = filled_form();
        let checker = StubChecker::new(vec![]);

        form.run_check(CheckKind::Email, &checker);
        assert_eq!(
            checker.calls.borrow().as_slice(),
            &[(CheckKind::Email, "kim@example.com".to_string())]
        );
        assert!(form.check_state(CheckKind::Email).is_available());
        assert!(form.status(RegisterField::Email).is_success());
    }

    #[test]
    fn test_check_taken_marks_field() {
        let mut form = filled_form();
        let checker = StubChecker::new(vec!["neo"]);

        form.run_check(CheckKind::Nickname, &checker);
        assert_eq!(
            form.check_state(CheckKind::Nickname),
            &CheckState::Taken("already in use".to_string())
        );
        assert_eq!(
            form.status(RegisterField::Nickname).error(),
            Some(&FieldError::NicknameTaken)
        );
    }

    #[test]
    fn test_check_failure_is_not_availability() {
        let mut form = filled_form();
        let mut checker = StubChecker::new(vec![]);
        checker.fail = true;

        let outcome = form.run_check(CheckKind::Email, &checker).expect("should run");
        assert!(outcome.transport_failure);
        assert!(matches!(form.check_state(CheckKind::Email), CheckState::Failed(_)));
        assert!(!form.status(RegisterField::Email).is_error());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut form = filled_form();

        let first = form.begin_check(CheckKind::Email).expect("valid email");
        let second = form.begin_check(CheckKind::Email).expect("valid email");
        assert!(form.check_in_flight(CheckKind::Email));

        // Second answers first, then the older request comes back late
        assert!(form.complete_check(&second, CheckOutcome::available("available")));
        assert!(!form.complete_check(&first, CheckOutcome::taken("already in use")));

        assert!(form.check_state(CheckKind::Email).is_available());
        assert!(!form.check_in_flight(CheckKind::Email));
    }

    #[test]
    fn test_input_after_check_resets_availability() {
        let mut form = filled_form();
        let checker = StubChecker::new(vec![]);
        let ticket = form.begin_check(CheckKind::Email).expect("valid email");

        form.input_email("other@example.com");
        assert!(!form.complete_check(&ticket, checker.check_email(&ticket.value)));
        assert_eq!(form.check_state(CheckKind::Email), &CheckState::Unchecked);
    }

    #[test]
    fn test_submit_reports_invalid_fields_in_order() {
        let mut form = RegisterForm::default();
        form.input_nickname("neo");

        let decision = form.submit();
        assert_eq!(
            decision,
            SubmitDecision::Blocked(SubmitBlock::InvalidFields(vec![
                RegisterField::Email,
                RegisterField::Password,
                RegisterField::ConfirmPassword,
            ]))
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_submit_requires_duplicate_checks() {
        let mut form = filled_form();
        let checker = StubChecker::new(vec![]);

        assert_eq!(
            form.submit(),
            SubmitDecision::Blocked(SubmitBlock::EmailNotChecked)
        );

        form.run_check(CheckKind::Email, &checker);
        assert_eq!(
            form.submit(),
            SubmitDecision::Blocked(SubmitBlock::NicknameNotChecked)
        );

        form.run_check(CheckKind::Nickname, &checker);
        assert_eq!(form.submit(), SubmitDecision::Proceed { delay: SUBMIT_DELAY });
        assert!(form.is_submitting());
    }

    #[test]
    fn test_second_submit_is_blocked_while_submitting() {
        let mut form = filled_form();
        let checker = StubChecker::new(vec![]);
        form.run_check(CheckKind::Email, &checker);
        form.run_check(CheckKind::Nickname, &checker);

        assert!(form.submit().is_proceed());
        assert_eq!(
            form.submit(),
            SubmitDecision::Blocked(SubmitBlock::AlreadySubmitting)
        );
        assert!(form.is_submitting());
    }

    #[test]
    fn test_submit_with_mismatched_confirmation() {
        let mut form = filled_form();
        form.input_confirm_password(secret("Zebra#Kite43"));

        assert_eq!(
            form.submit(),
            SubmitDecision::Blocked(SubmitBlock::InvalidFields(vec![RegisterField::ConfirmPassword]))
        );
        assert_eq!(
            form.status(RegisterField::ConfirmPassword).error(),
            Some(&FieldError::ConfirmMismatch)
        );
    }
}
