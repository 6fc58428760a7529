//! End-to-end tests for both analysis passes over hand-built trees

use cminus_sema::ast::*;
use cminus_sema::common::{Listing, SemanticError, SemanticErrorKind};
use cminus_sema::sema::{walk_program, ScopeEvent, Visitor};
use cminus_sema::{AnalyzerConfig, CompileError, SemanticAnalyzer};
use pretty_assertions::assert_eq;

fn analyze(program: &mut Program) -> (cminus_sema::AnalysisResult, Vec<SemanticError>) {
    let mut errors: Vec<SemanticError> = Vec::new();
    let analysis = SemanticAnalyzer::default().analyze(program, &mut errors);
    (analysis, errors)
}

fn kinds(errors: &[SemanticError]) -> Vec<SemanticErrorKind> {
    errors.iter().map(|e| e.kind.clone()).collect()
}

fn main_fn(stmts: Vec<Stmt>) -> Stmt {
    Stmt::function("main", Type::Void, vec![Stmt::void_param(10)], Stmt::compound(stmts, 10), 10)
}

/// int f(int a, int b) { return a + b; }
fn two_param_fn() -> Stmt {
    Stmt::function(
        "f",
        Type::Integer,
        vec![Stmt::param("a", Type::Integer, 1), Stmt::param("b", Type::Integer, 1)],
        Stmt::compound(
            vec![Stmt::ret(
                Some(Expr::binary(BinaryOp::Add, Expr::var("a", 2), Expr::var("b", 2), 2)),
                2,
            )],
            1,
        ),
        1,
    )
}

/// A program exercising most node kinds without any violation:
///
/// ```text
/// int g[10];
/// int gcd(int u, int v) {
///     if (v == 0) return u;
///     else return gcd(v, u - u / v * v);
/// }
/// void main(void) {
///     int x; int i;
///     i = 0;
///     while (i < 10) {
///         int y;
///         y = input();
///         g[i] = gcd(y, 3);
///         i = i + 1;
///     }
///     x = g[0];
///     output(x);
/// }
/// ```
fn clean_program() -> Program {
    let modulo = Expr::binary(
        BinaryOp::Sub,
        Expr::var("u", 4),
        Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Div, Expr::var("u", 4), Expr::var("v", 4), 4),
            Expr::var("v", 4),
            4,
        ),
        4,
    );
    Program::new(vec![
        Stmt::var_decl("g", Type::IntegerArray, 1),
        Stmt::function(
            "gcd",
            Type::Integer,
            vec![Stmt::param("u", Type::Integer, 2), Stmt::param("v", Type::Integer, 2)],
            Stmt::compound(
                vec![Stmt::if_(
                    Expr::binary(BinaryOp::Eq, Expr::var("v", 3), Expr::constant(0, 3), 3),
                    Stmt::ret(Some(Expr::var("u", 3)), 3),
                    Some(Stmt::ret(Some(Expr::call("gcd", vec![Expr::var("v", 4), modulo], 4)), 4)),
                    3,
                )],
                2,
            ),
            2,
        ),
        Stmt::function(
            "main",
            Type::Void,
            vec![Stmt::void_param(6)],
            Stmt::compound(
                vec![
                    Stmt::var_decl("x", Type::Integer, 7),
                    Stmt::var_decl("i", Type::Integer, 7),
                    Stmt::expr(Expr::assign(Expr::var("i", 8), Expr::constant(0, 8), 8)),
                    Stmt::while_(
                        Expr::binary(BinaryOp::Lt, Expr::var("i", 9), Expr::constant(10, 9), 9),
                        Stmt::compound(
                            vec![
                                Stmt::var_decl("y", Type::Integer, 10),
                                Stmt::expr(Expr::assign(
                                    Expr::var("y", 11),
                                    Expr::call("input", vec![], 11),
                                    11,
                                )),
                                Stmt::expr(Expr::assign(
                                    Expr::index("g", Expr::var("i", 12), 12),
                                    Expr::call("gcd", vec![Expr::var("y", 12), Expr::constant(3, 12)], 12),
                                    12,
                                )),
                                Stmt::expr(Expr::assign(
                                    Expr::var("i", 13),
                                    Expr::binary(BinaryOp::Add, Expr::var("i", 13), Expr::constant(1, 13), 13),
                                    13,
                                )),
                            ],
                            9,
                        ),
                        9,
                    ),
                    Stmt::expr(Expr::assign(
                        Expr::var("x", 15),
                        Expr::index("g", Expr::constant(0, 15), 15),
                        15,
                    )),
                    Stmt::expr(Expr::call("output", vec![Expr::var("x", 16)], 16)),
                ],
                6,
            ),
            6,
        ),
    ])
}

#[test]
fn test_clean_program_has_no_errors() {
    let mut program = clean_program();
    let (analysis, errors) = analyze(&mut program);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(!analysis.failed);
    assert!(analysis.into_result().is_ok());
}

#[test]
fn test_clean_program_scope_tree() {
    let mut program = clean_program();
    let (analysis, _) = analyze(&mut program);
    let table = &analysis.table;

    let names: Vec<&str> = table.preorder().into_iter().map(|s| table.scope(s).name.as_str()).collect();
    assert_eq!(names, vec!["global", "gcd", "main", "main-9"]);

    let g = table.lookup(table.global(), "g").unwrap();
    assert_eq!(table.symbol(g).lines, vec![1, 12, 15]);
    let gcd = table.lookup(table.global(), "gcd").unwrap();
    assert_eq!(table.symbol(gcd).lines, vec![2, 4, 12]);
}

#[test]
fn test_redeclaration_same_scope() {
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::var_decl("x", Type::Integer, 12),
    ])]);
    let (analysis, errors) = analyze(&mut program);
    assert_eq!(
        errors,
        vec![SemanticError::new(SemanticErrorKind::RedefinedVariable("x".into()), 12)]
    );
    assert!(analysis.failed);
}

#[test]
fn test_shadowing_resolves_innermost() {
    // void main(void) { int x; { int x[2]; x[0] = 1; } x = 2; }
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::compound(
            vec![
                Stmt::var_decl("x", Type::IntegerArray, 13),
                Stmt::expr(Expr::assign(
                    Expr::index("x", Expr::constant(0, 14), 14),
                    Expr::constant(1, 14),
                    14,
                )),
            ],
            12,
        ),
        Stmt::expr(Expr::assign(Expr::var("x", 16), Expr::constant(2, 16), 16)),
    ])]);
    let (analysis, errors) = analyze(&mut program);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let table = &analysis.table;
    let main = table.find_child_scope(table.global(), "main").unwrap();
    let block = table.find_child_scope(main, "main-12").unwrap();
    let inner = table.lookup(block, "x").unwrap();
    let outer = table.lookup(main, "x").unwrap();
    assert_ne!(inner, outer);
    assert_eq!(table.symbol(inner).ty, Type::IntegerArray);
    assert_eq!(table.symbol(outer).ty, Type::Integer);
    assert_eq!(table.lookup(block, "x"), table.lookup(block, "x"));
}

#[test]
fn test_undefined_identifier_reported_once() {
    // void main(void) { int x; x = undeclared + 1; }
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::expr(Expr::assign(
            Expr::var("x", 12),
            Expr::binary(BinaryOp::Add, Expr::var("undeclared", 12), Expr::constant(1, 12), 12),
            12,
        )),
    ])]);
    let (_, errors) = analyze(&mut program);
    assert_eq!(
        errors,
        vec![SemanticError::new(SemanticErrorKind::UndefinedIdentifier("undeclared".into()), 12)]
    );

    let StmtKind::FunDecl(main) = &program.declarations[0].kind else { panic!() };
    let StmtKind::Compound(body) = &main.body.kind else { panic!() };
    let StmtKind::Expr(assign) = &body.stmts[1].kind else { panic!() };
    assert_eq!(assign.ty, Some(Type::Error));
}

#[test]
fn test_array_indexing() {
    // void main(void) { int a[5]; int x; bool b;
    //   x = a[0]; x = a[b]; x = x[0]; x = a[a]; }
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("a", Type::IntegerArray, 11),
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::var_decl("b", Type::Boolean, 11),
        Stmt::expr(Expr::assign(Expr::var("x", 12), Expr::index("a", Expr::constant(0, 12), 12), 12)),
        Stmt::expr(Expr::assign(Expr::var("x", 13), Expr::index("a", Expr::var("b", 13), 13), 13)),
        Stmt::expr(Expr::assign(Expr::var("x", 14), Expr::index("x", Expr::constant(0, 14), 14), 14)),
        Stmt::expr(Expr::assign(Expr::var("x", 15), Expr::index("a", Expr::var("a", 15), 15), 15)),
    ])]);
    let (_, errors) = analyze(&mut program);
    assert_eq!(
        errors,
        vec![
            SemanticError::new(SemanticErrorKind::ArrayIndexType, 13),
            SemanticError::new(SemanticErrorKind::IndexOnNonArray, 14),
            SemanticError::new(SemanticErrorKind::ArrayIndexType, 15),
        ]
    );
}

#[test]
fn test_call_arity_and_argument_types() {
    // int f(int a, int b) {...}
    // void main(void) { bool t; f(1); f(1, 2, 3); f(1, t); f(1, 2); }
    let mut program = Program::new(vec![
        two_param_fn(),
        main_fn(vec![
            Stmt::var_decl("t", Type::Boolean, 11),
            Stmt::expr(Expr::call("f", vec![Expr::constant(1, 12)], 12)),
            Stmt::expr(Expr::call(
                "f",
                vec![Expr::constant(1, 13), Expr::constant(2, 13), Expr::constant(3, 13)],
                13,
            )),
            Stmt::expr(Expr::call("f", vec![Expr::constant(1, 14), Expr::var("t", 14)], 14)),
            Stmt::expr(Expr::call("f", vec![Expr::constant(1, 15), Expr::constant(2, 15)], 15)),
        ]),
    ]);
    let (_, errors) = analyze(&mut program);
    assert_eq!(
        errors,
        vec![
            SemanticError::new(SemanticErrorKind::TooFewArguments("f".into()), 12),
            SemanticError::new(SemanticErrorKind::TooManyArguments("f".into()), 13),
            SemanticError::new(
                SemanticErrorKind::ArgumentMismatch { param: "b".into(), position: 2 },
                14,
            ),
        ]
    );

    let StmtKind::FunDecl(main) = &program.declarations[1].kind else { panic!() };
    let StmtKind::Compound(body) = &main.body.kind else { panic!() };
    let StmtKind::Expr(good_call) = &body.stmts[4].kind else { panic!() };
    assert_eq!(good_call.ty, Some(Type::Integer));
}

#[test]
fn test_only_first_argument_mismatch_reported() {
    // void main(void) { bool t; f(t, t); }
    let mut program = Program::new(vec![
        two_param_fn(),
        main_fn(vec![
            Stmt::var_decl("t", Type::Boolean, 11),
            Stmt::expr(Expr::call("f", vec![Expr::var("t", 12), Expr::var("t", 12)], 12)),
        ]),
    ]);
    let (_, errors) = analyze(&mut program);
    assert_eq!(
        kinds(&errors),
        vec![SemanticErrorKind::ArgumentMismatch { param: "a".into(), position: 1 }]
    );
}

#[test]
fn test_return_rules() {
    // void g(void) { return 1; }
    // int h1(void) { return; }
    // int h2(void) { bool t; return t; }
    // int h3(void) { return 1; }
    let function = |name: &str, ret: Type, line: u32, stmts: Vec<Stmt>| {
        Stmt::function(name, ret, vec![Stmt::void_param(line)], Stmt::compound(stmts, line), line)
    };
    let mut program = Program::new(vec![
        function("g", Type::Void, 1, vec![Stmt::ret(Some(Expr::constant(1, 2)), 2)]),
        function("h1", Type::Integer, 3, vec![Stmt::ret(None, 4)]),
        function(
            "h2",
            Type::Integer,
            5,
            vec![Stmt::var_decl("t", Type::Boolean, 6), Stmt::ret(Some(Expr::var("t", 7)), 7)],
        ),
        function("h3", Type::Integer, 8, vec![Stmt::ret(Some(Expr::constant(1, 9)), 9)]),
    ]);
    let (_, errors) = analyze(&mut program);
    assert_eq!(
        errors,
        vec![
            SemanticError::new(SemanticErrorKind::ReturnValueInVoid, 2),
            SemanticError::new(SemanticErrorKind::ReturnMissingValue, 4),
            SemanticError::new(SemanticErrorKind::ReturnTypeMismatch(Type::Integer), 7),
        ]
    );
    assert_eq!(
        errors[2].to_string(),
        "Semantic Error: return type mismatch, expected 'int' at line 7"
    );
}

#[test]
fn test_errors_accumulate_across_functions() {
    let mut program = Program::new(vec![
        main_fn(vec![Stmt::expr(Expr::var("nope", 11))]),
        Stmt::function(
            "k",
            Type::Integer,
            vec![Stmt::void_param(20)],
            Stmt::compound(vec![Stmt::ret(None, 21)], 20),
            20,
        ),
    ]);
    let (analysis, errors) = analyze(&mut program);
    assert_eq!(errors.len(), 2);
    assert_eq!(analysis.error_count, 2);
    match analysis.into_result() {
        Err(CompileError::Semantic { count }) => assert_eq!(count, 2),
        other => panic!("expected semantic failure, got {other:?}"),
    }
}

#[test]
fn test_passes_see_same_scope_events() {
    let mut program = clean_program();
    let (analysis, _) = analyze(&mut program);

    assert_eq!(analysis.declaration_events, analysis.check_events);
    assert_eq!(
        analysis.check_events,
        vec![
            ScopeEvent::Enter("gcd".into()),
            ScopeEvent::Exit("gcd".into()),
            ScopeEvent::Enter("main".into()),
            ScopeEvent::Enter("main-9".into()),
            ScopeEvent::Exit("main-9".into()),
            ScopeEvent::Exit("main".into()),
        ]
    );
}

/// Drops the scope annotations left by the declaration pass.
struct ForgetScopes;

impl Visitor for ForgetScopes {
    fn enter_stmt(&mut self, stmt: &mut Stmt) {
        match &mut stmt.kind {
            StmtKind::FunDecl(func) => func.scope = None,
            StmtKind::Compound(block) => block.scope = None,
            _ => {}
        }
    }
}

#[test]
fn test_type_check_by_scope_name() {
    use cminus_sema::sema::{build_symbol_table, type_check, SymbolTable};

    // void main(void) { int x; { bool x; x = 1; } }
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::compound(
            vec![
                Stmt::var_decl("x", Type::Boolean, 13),
                Stmt::expr(Expr::assign(Expr::var("x", 14), Expr::constant(1, 14), 14)),
            ],
            12,
        ),
    ])]);

    let mut table = SymbolTable::new();
    let mut errors: Vec<SemanticError> = Vec::new();
    let declared = build_symbol_table(&mut program, &mut table, &mut errors);
    walk_program(&mut ForgetScopes, &mut program);
    let checked = type_check(&mut program, &table, &mut errors);

    assert_eq!(declared.events, checked.events);
    assert_eq!(
        errors,
        vec![SemanticError::new(SemanticErrorKind::AssignmentMismatch, 14)]
    );
}

#[test]
fn test_listing_output() {
    let mut program = Program::new(vec![main_fn(vec![Stmt::expr(Expr::var("ghost", 11))])]);
    let mut listing = Listing::new(Vec::new());
    let analysis = SemanticAnalyzer::new(AnalyzerConfig::default()).analyze(&mut program, &mut listing);

    assert!(analysis.failed);
    let text = String::from_utf8(listing.into_inner()).unwrap();
    assert_eq!(text, "Semantic Error: undefined identifier 'ghost' at line 11\n");
}

#[test]
fn test_trace_writes_reports_to_listing() {
    // void main(void) { int x; bool b; x = b; }
    let mut program = Program::new(vec![main_fn(vec![
        Stmt::var_decl("x", Type::Integer, 11),
        Stmt::var_decl("b", Type::Boolean, 12),
        Stmt::expr(Expr::assign(Expr::var("x", 13), Expr::var("b", 13), 13)),
    ])]);
    let mut listing = Listing::new(Vec::new());
    let config = AnalyzerConfig { trace: true, verbose: true };
    let analysis = SemanticAnalyzer::new(config).analyze(&mut program, &mut listing);
    assert!(analysis.failed);

    let text = String::from_utf8(listing.into_inner()).unwrap();
    let marks: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with('<') || l.starts_with("Semantic Error:"))
        .collect();
    assert_eq!(
        marks,
        vec![
            "< Symbol Table >",
            "< Function Table >",
            "< Function and Global Variables >",
            "< Local Variables >",
            "Semantic Error: type mismatch between left and right operand of assignment at line 13",
        ]
    );
    assert!(text.contains("main"));
}
