use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::env_record::EnvironmentRecordType;

pub type JsLexEnvironmentType = Rc<RefCell<LexEnvironment>>;

/// One link of the scope chain: an environment record plus the enclosing
/// environment. The chain ends at the global environment.
pub struct LexEnvironment {
    pub inner: EnvironmentRecordType,
    pub outer: Option<JsLexEnvironmentType>,
}

/// Innermost environment on the chain holding a binding for `name`, or
/// `None` when the name is unresolved.
pub fn resolve_binding_environment(
    lex: &JsLexEnvironmentType,
    name: &str,
) -> Option<JsLexEnvironmentType> {
    let mut current = lex.clone();
    loop {
        let outer = {
            let env = current.borrow();
            if env.inner.as_env_record().has_binding(name) {
                return Some(current.clone());
            }
            env.outer.clone()
        };
        match outer {
            Some(o) => current = o,
            None => return None,
        }
    }
}

/// Environment that supplies `this` for code running under `lex`. Walks
/// outward past arrow-function and block scopes; the global environment
/// always terminates the search.
pub fn resolve_this_environment(lex: &JsLexEnvironmentType) -> JsLexEnvironmentType {
    let mut current = lex.clone();
    loop {
        let outer = {
            let env = current.borrow();
            if env.inner.as_env_record().has_this_binding() {
                return current.clone();
            }
            env.outer.clone()
        };
        match outer {
            Some(o) => current = o,
            // Chains are always rooted at the global environment, which has
            // a this binding. A detached chain resolves to its last link.
            None => return current,
        }
    }
}
