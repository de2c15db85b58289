use crate::{AuthorizationRequest, RuleSet};

/// Decides whether `request` is granted by any rule of `rule_set`.
///
/// Rules for the requested resource are visited in declaration order.
/// A rule whose methods do not include the requested method is skipped,
/// and the first rule that also lists the requested role grants access.
/// Access is denied when no rule grants it.
pub fn is_authorized(request: &AuthorizationRequest, rule_set: &RuleSet) -> bool {
    rule_set
        .rules_for(request.resource())
        .filter(|rule| rule.allows_method(request.method()))
        .any(|rule| rule.permits_role(request.role()))
}

#[cfg(test)]
mod tests {
    use proptest::{collection::vec, prelude::*, sample::select};
    use test_case::test_case;

    use super::*;
    use crate::{
        rules::tests::{build_rule_set, SAMPLE_RULES},
        Rule,
    };

    /// Plain scan over every rule, without the resource index.
    fn scan(request: &AuthorizationRequest, rules: &[Rule]) -> bool {
        for rule in rules {
            if rule.resource() != request.resource() {
                continue;
            }
            if !rule.allowed_methods().iter().any(|m| m == request.method()) {
                continue;
            }
            if rule.roles().iter().any(|r| r == request.role()) {
                return true;
            }
        }
        false
    }

    #[test_case("/users", "GET", "admin", true ; "get users as admin")]
    #[test_case("/users", "POST", "user", true ; "post users as user")]
    #[test_case("/users", "PUT", "admin", false ; "method not allowed")]
    #[test_case("/users", "GET", "guest", false ; "role not permitted")]
    #[test_case("/products", "GET", "admin", false ; "no matching resource")]
    #[test_case("/admin", "POST", "admin", false ; "method not allowed on admin")]
    #[test_case("/admin", "GET", "admin", true ; "get admin as admin")]
    #[test_case("/admin", "GET", "user", false ; "admin resource denies user")]
    #[test_case("/Users", "GET", "admin", false ; "resource is case sensitive")]
    #[test_case("/users", "get", "admin", false ; "method is case sensitive")]
    #[test_case("/users", "GET", "Admin", false ; "role is case sensitive")]
    #[test_case("/users/", "GET", "admin", false ; "no prefix matching")]
    #[test_case("/users", "GET ", "admin", false ; "no trimming")]
    fn sample_rules(resource: &str, method: &str, role: &str, expected: bool) {
        let rule_set = build_rule_set(SAMPLE_RULES);
        let request = AuthorizationRequest::new(resource, method, role);

        assert_eq!(expected, is_authorized(&request, &rule_set));
    }

    #[test]
    fn empty_rule_set_denies() {
        let rule_set = RuleSet::default();

        assert!(!is_authorized(
            &AuthorizationRequest::new("/users", "GET", "admin"),
            &rule_set
        ));
    }

    #[test]
    fn later_rule_for_same_resource_can_grant() {
        let rule_set = RuleSet::new(vec![
            Rule::new("/reports", ["GET"], ["analyst"]),
            Rule::new("/reports", ["DELETE"], ["admin"]),
        ]);

        assert!(is_authorized(
            &AuthorizationRequest::new("/reports", "DELETE", "admin"),
            &rule_set
        ));
        assert!(!is_authorized(
            &AuthorizationRequest::new("/reports", "DELETE", "analyst"),
            &rule_set
        ));
    }

    #[test]
    fn matching_method_with_other_role_keeps_scanning() {
        let rule_set = RuleSet::new(vec![
            Rule::new("/reports", ["GET"], ["analyst"]),
            Rule::new("/reports", ["GET"], ["auditor"]),
        ]);

        assert!(is_authorized(
            &AuthorizationRequest::new("/reports", "GET", "auditor"),
            &rule_set
        ));
    }

    #[test]
    fn inert_rules_never_grant() {
        let rule_set = RuleSet::new(vec![
            Rule::new("/reports", Vec::<String>::new(), ["admin"]),
            Rule::new("/reports", ["GET"], Vec::<String>::new()),
        ]);

        assert!(!is_authorized(
            &AuthorizationRequest::new("/reports", "GET", "admin"),
            &rule_set
        ));
    }

    const RESOURCES: &[&str] = &["/users", "/admin", "/Users", "/reports", ""];
    const METHODS: &[&str] = &["GET", "POST", "PUT", "get", ""];
    const ROLES: &[&str] = &["admin", "user", "guest", "Admin", ""];

    fn token(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
        select(pool).prop_map(str::to_string)
    }

    fn rule() -> impl Strategy<Value = Rule> {
        (
            token(RESOURCES),
            vec(token(METHODS), 0..3),
            vec(token(ROLES), 0..3),
        )
            .prop_map(|(resource, methods, roles)| Rule::new(resource, methods, roles))
    }

    fn request() -> impl Strategy<Value = AuthorizationRequest> {
        (token(RESOURCES), token(METHODS), token(ROLES))
            .prop_map(|(resource, method, role)| AuthorizationRequest::new(resource, method, role))
    }

    proptest! {
        #[test]
        fn index_agrees_with_scan(rules in vec(rule(), 0..8), request in request()) {
            let rule_set = RuleSet::new(rules.clone());

            prop_assert_eq!(scan(&request, &rules), is_authorized(&request, &rule_set));
        }

        #[test]
        fn unknown_resource_denies(
            rules in vec(rule(), 0..8),
            method in token(METHODS),
            role in token(ROLES),
        ) {
            let rule_set = RuleSet::new(rules);
            let request = AuthorizationRequest::new("/unknown", method, role);

            prop_assert!(!is_authorized(&request, &rule_set));
        }

        #[test]
        fn granting_rule_wins_regardless_of_position(
            before in vec(rule(), 0..5),
            after in vec(rule(), 0..5),
            request in request(),
        ) {
            let granting = Rule::new(
                request.resource(),
                [request.method()],
                [request.role()],
            );
            let mut rules = before;
            rules.push(granting);
            rules.extend(after);

            prop_assert!(is_authorized(&request, &RuleSet::new(rules)));
        }

        #[test]
        fn evaluation_is_idempotent(rules in vec(rule(), 0..8), request in request()) {
            let rule_set = RuleSet::new(rules);

            prop_assert_eq!(
                is_authorized(&request, &rule_set),
                is_authorized(&request, &rule_set)
            );
        }

        #[test]
        fn order_does_not_change_outcome(rules in vec(rule(), 0..8), request in request()) {
            let mut reversed = rules.clone();
            reversed.reverse();

            prop_assert_eq!(
                is_authorized(&request, &RuleSet::new(rules)),
                is_authorized(&request, &RuleSet::new(reversed))
            );
        }
    }
}
