pub mod core;
pub mod query;
pub mod storage;
pub mod shell;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          COURSEDB STRUCT ARCHITECTURE                         │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── SHELL LAYER ─────────────────────────────────┐
│                                                                              │
│  ┌────────────────────────────────────────────────────────────────────┐      │
│  │                          struct Session                            │      │
│  │  config: Config          // storage path, prompt, confirm_delete   │      │
│  │  store: Store            // the only mutable state                 │      │
│  │  parser: CommandParser   // line → Command                         │      │
│  │  dirty: bool             // unsaved changes                        │      │
│  └────────────────────────────────────────────────────────────────────┘      │
│   process_line(line, input, out) → Flow { Continue | Exit }                  │
│   handlers.rs: one handler per verb   render.rs: table / summary / matches   │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── QUERY LAYER ─────────────────────────────────┐
│                                                                              │
│  lexer.rs                 parser.rs                  matcher.rs              │
│  • words() (nom)          • CommandParser::parse     • FindFilter::matches   │
│  • scan_key_values()      • builds Patch / Student   • filter_records        │
│    → KeyValues            • SORT BY clause (regex)                          │
│                                                                              │
│  enum Command: Open | Save | Show(ShowMode) | Insert(Student)                │
│                Update{id, patch} | Delete(id) | Query(id) | Find(FindFilter) │
│                Help | Exit | Unknown(verb)                                   │
└──────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── CORE LAYER ─────────────────────────────────┐
│                                                                              │
│  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────────┐    │
│  │ struct Store     │  │ struct Student   │  │ struct Stats             │    │
│  │ • records: Vec   │  │ • id: StudentId  │  │ • count, average         │    │
│  │ find_index       │  │ • name           │  │ • min/max mark + index   │    │
│  │ insert / update  │  │ • programme      │  │ • bands: BandCounts      │    │
│  │ delete / sort    │  │ • mark: f32      │  └──────────────────────────┘    │
│  └──────────────────┘  └──────────────────┘                                  │
│                        ┌──────────────────┐  ┌──────────────────────────┐    │
│                        │ struct Patch     │  │ validation.rs            │    │
│                        │ • Option fields  │  │ valid_id / valid_mark /  │    │
│                        └──────────────────┘  │ valid_text               │    │
│                                              └──────────────────────────┘    │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── STORAGE LAYER ────────────────────────────────┐
│  text_file.rs: ID<TAB>Name<TAB>Programme<TAB>Mark                            │
│  • load / read_records → LoadReport { store, loaded, skipped }               │
│  • save (temp file + rename) / write_records                                 │
└──────────────────────────────────────────────────────────────────────────────┘
*/
