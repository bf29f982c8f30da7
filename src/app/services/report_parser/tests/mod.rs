//! Test fixtures for report parser testing
//!
//! Exports are built cell by cell so every column lands exactly where the
//! layouts expect it.

// Test modules
mod diagnostics_tests;
mod parser_tests;
mod ranking_tests;
mod segmenter_tests;

/// Join cells into one export line
pub fn line(cells: &[&str]) -> String {
    cells.join(";")
}

/// Join lines into an export
pub fn export(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Cells as owned strings, as the reader produces them
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Per-employee values shared by the fixtures
pub struct Employee {
    pub name: &'static str,
    pub rank: &'static str,
    pub sales: &'static str,
    pub attainment: &'static str,
    pub margin_count: &'static str,
    pub average_sale: &'static str,
    pub period: &'static str,
    pub terminated: &'static str,
}

pub const ANA: Employee = Employee {
    name: "Ana Souza",
    rank: "1",
    sales: "R$ 1.000,00",
    attainment: "50%",
    margin_count: "3",
    average_sale: "R$ 333,33",
    period: "MANHÃ",
    terminated: "FALSE",
};

pub const BRUNO: Employee = Employee {
    name: "Bruno Lima",
    rank: "2",
    sales: "R$ 500,00",
    attainment: "25%",
    margin_count: "1",
    average_sale: "R$ 500,00",
    period: "manh\u{FFFD}",
    terminated: "TRUE",
};

pub const CARLA: Employee = Employee {
    name: "Carla Dias",
    rank: "5º",
    sales: "R$ 250,50",
    attainment: "12,5%",
    margin_count: "0",
    average_sale: "R$ 250,50",
    period: "Tarde",
    terminated: " True ",
};

/// Sum of the fixture employees' sales
pub const FIXTURE_TOTAL_SALES: f64 = 1750.5;

/// Layout A employee line (19 columns)
pub fn legacy_line(e: &Employee) -> String {
    line(&[
        e.name,
        e.rank,
        e.sales,
        e.attainment,
        "R$ 200,00",
        e.margin_count,
        e.average_sale,
        "10",
        "0 00:05:00",
        "0 00:01:00",
        "3 08:35:00",
        "",
        "4",
        "0 00:03:00",
        "-",
        "0",
        "",
        e.period,
        e.terminated,
    ])
}

/// Layout B employee line (17 columns)
pub fn attendance_line(e: &Employee) -> String {
    line(&[
        e.name,
        e.rank,
        e.sales,
        e.attainment,
        "R$ 200,00",
        e.margin_count,
        e.average_sale,
        "10",
        "0 00:05:00",
        "0 00:01:00",
        "0 16:39:54",
        "01/03/2024",
        e.period,
        e.terminated,
        "2",
        "-",
        "15/01/2023",
    ])
}

pub fn title_line() -> String {
    line(&["RELATÓRIO DE DESEMPENHO - EQUIPE AZUL", "", ""])
}

pub fn header_line() -> String {
    line(&["Nome", "Pos. Ranking", "Vendas Portabilidade", "Atingimento"])
}

pub fn footer_marker_line() -> String {
    line(&["RESULTADO GERAL", "", ""])
}

pub fn footer_titles_line() -> String {
    line(&["Total Vendido", "Atingimento", "Margem", "Ticket Médio", "TMA"])
}

/// Layout A footer values (flat block)
pub fn legacy_footer_line(total: &str) -> String {
    line(&[total, "29,17%", "4", "R$ 361,28", "0 00:05:00", "3", "10%"])
}

/// Layout B footer values: geral at 0, manha at 10, tarde at 19, rank at 28
pub fn attendance_footer_line(total: &str) -> String {
    line(&[
        // geral
        total,
        "29,17%",
        "4",
        "R$ 583,50",
        "0 00:05:30",
        "10%",
        "1",
        "1",
        "R$ 300,00",
        "",
        // manha
        "R$ 1.500,00",
        "37,5%",
        "4",
        "R$ 416,67",
        "0 00:05:00",
        "0",
        "1",
        "R$ 200,00",
        "",
        // tarde
        "R$ 250,50",
        "12,5%",
        "0",
        "R$ 250,50",
        "0 00:06:00",
        "1",
        "0",
        "R$ 100,00",
        "",
        // rank
        "3",
    ])
}

/// Complete Layout A export with footer
pub fn legacy_export() -> String {
    export(&[
        title_line(),
        header_line(),
        legacy_line(&ANA),
        legacy_line(&BRUNO),
        legacy_line(&CARLA),
        footer_marker_line(),
        footer_titles_line(),
        legacy_footer_line("R$ 1.750,50"),
    ])
}

/// Layout A export that ends after the employee rows
pub fn legacy_export_without_footer() -> String {
    export(&[
        title_line(),
        header_line(),
        legacy_line(&ANA),
        legacy_line(&BRUNO),
        legacy_line(&CARLA),
    ])
}

/// Complete Layout B export with a footer holding all three blocks
pub fn attendance_export() -> String {
    attendance_export_with_footer(attendance_footer_line("R$ 1.750,50"))
}

/// Layout B export with a custom footer value line
pub fn attendance_export_with_footer(footer: String) -> String {
    export(&[
        title_line(),
        header_line(),
        attendance_line(&ANA),
        attendance_line(&BRUNO),
        attendance_line(&CARLA),
        footer_marker_line(),
        footer_titles_line(),
        footer,
    ])
}

/// Minimal leaderboard: header, two employees, a nameless row and the total
pub fn ranking_export() -> String {
    export(&[
        line(&["Pos.", "Nome", "Vendas", "Leads", "TMA", "TPC", "TFA"]),
        line(&[
            "1",
            "Ana Souza",
            "R$ 1.000,00",
            "10",
            "0 00:05:00",
            "0 00:01:00",
            "0 00:04:00",
        ]),
        line(&[
            "2",
            "Bruno Lima",
            "R$ 500,00",
            "8",
            "0 00:06:00",
            "-",
            "0",
        ]),
        line(&["", "   ", "R$ 10,00", "1", "", "", ""]),
        line(&[
            "",
            "total",
            "R$ 1.500,00",
            "18",
            "3 2 08:35:00",
            "0 00:02:00",
            "1 04:00:00",
        ]),
    ])
}

/// Extended leaderboard with attendance columns
pub fn extended_ranking_export() -> String {
    export(&[
        line(&[
            "Pos.", "Nome", "Vendas", "Ating.", "Leads", "TMA", "TPC", "TFA", "Turno", "Desligado",
            "Atrasos", "Faltas", "Admissão",
        ]),
        line(&[
            "1",
            "Ana Souza",
            "R$ 1.000,00",
            "50%",
            "10",
            "0 00:05:00",
            "0 00:01:00",
            "0 00:04:00",
            "MANHÃ",
            "FALSE",
            "2",
            "-",
            "15/01/2023",
        ]),
        line(&[
            "2",
            "Bruno Lima",
            "R$ 500,00",
            "25%",
            "8",
            "0 00:06:00",
            "0 00:02:00",
            "0 00:03:00",
            "TARDE",
            "true",
            "0",
            "1",
            "02/02/2022",
        ]),
        line(&[
            "-",
            "TOTAL",
            "R$ 1.500,00",
            "37,5%",
            "18",
            "3 2 08:35:00",
            "0 00:03:00",
            "0 00:07:00",
            "",
            "",
            "",
            "",
            "",
        ]),
    ])
}

/// Compare floats that went through decimal text
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
