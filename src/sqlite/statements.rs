//! @ai:module:intent Fixed table order, indexes and reporting views of the CRM database
//! @ai:module:layer domain
//! @ai:module:stateless true

/// Parents before children so foreign keys resolve during inserts.
pub const TABLE_ORDER: [&str; 8] = [
    "employees",
    "clients",
    "contacts",
    "projects",
    "project_assignments",
    "time_entries",
    "invoices",
    "expenses",
];

/// A statement that applies only when all of its tables exist.
pub struct Statement {
    pub name: &'static str,
    pub tables: &'static [&'static str],
    pub sql: &'static str,
}

pub const INDEXES: [Statement; 9] = [
    Statement {
        name: "idx_contacts_client",
        tables: &["contacts"],
        sql: "CREATE INDEX IF NOT EXISTS idx_contacts_client ON contacts(client_id)",
    },
    Statement {
        name: "idx_projects_client",
        tables: &["projects"],
        sql: "CREATE INDEX IF NOT EXISTS idx_projects_client ON projects(client_id)",
    },
    Statement {
        name: "idx_time_entries_project",
        tables: &["time_entries"],
        sql: "CREATE INDEX IF NOT EXISTS idx_time_entries_project ON time_entries(project_id)",
    },
    Statement {
        name: "idx_time_entries_employee",
        tables: &["time_entries"],
        sql: "CREATE INDEX IF NOT EXISTS idx_time_entries_employee ON time_entries(employee_id)",
    },
    Statement {
        name: "idx_invoices_client",
        tables: &["invoices"],
        sql: "CREATE INDEX IF NOT EXISTS idx_invoices_client ON invoices(client_id)",
    },
    Statement {
        name: "idx_invoices_project",
        tables: &["invoices"],
        sql: "CREATE INDEX IF NOT EXISTS idx_invoices_project ON invoices(project_id)",
    },
    Statement {
        name: "idx_expenses_project",
        tables: &["expenses"],
        sql: "CREATE INDEX IF NOT EXISTS idx_expenses_project ON expenses(project_id)",
    },
    Statement {
        name: "idx_clients_code",
        tables: &["clients"],
        sql: "CREATE INDEX IF NOT EXISTS idx_clients_code ON clients(code)",
    },
    Statement {
        name: "idx_invoices_number",
        tables: &["invoices"],
        sql: "CREATE INDEX IF NOT EXISTS idx_invoices_number ON invoices(invoice_number)",
    },
];

pub const VIEWS: [Statement; 3] = [
    Statement {
        name: "v_project_summary",
        tables: &["projects", "clients", "employees", "time_entries", "expenses"],
        sql: "CREATE VIEW IF NOT EXISTS v_project_summary AS
            SELECT
                p.id,
                p.name AS project_name,
                c.name AS client_name,
                c.code AS client_code,
                p.type,
                p.status,
                p.budget_net,
                p.start_date,
                p.end_date,
                e.name AS lead_name,
                COALESCE(SUM(t.hours), 0) AS total_hours,
                COALESCE(SUM(exp.amount_net), 0) AS total_expenses
            FROM projects p
            LEFT JOIN clients c ON p.client_id = c.id
            LEFT JOIN employees e ON p.lead_employee_id = e.id
            LEFT JOIN time_entries t ON p.id = t.project_id
            LEFT JOIN expenses exp ON p.id = exp.project_id
            GROUP BY p.id",
    },
    Statement {
        name: "v_client_revenue",
        tables: &["clients", "invoices"],
        sql: "CREATE VIEW IF NOT EXISTS v_client_revenue AS
            SELECT
                c.id,
                c.code,
                c.name,
                c.industry,
                c.status,
                COUNT(DISTINCT i.id) AS invoice_count,
                COALESCE(SUM(i.amount_net), 0) AS total_revenue_net,
                COALESCE(SUM(i.amount_gross), 0) AS total_revenue_gross
            FROM clients c
            LEFT JOIN invoices i ON c.id = i.client_id AND i.status = 'paid'
            GROUP BY c.id",
    },
    Statement {
        name: "v_employee_hours",
        tables: &["employees", "time_entries"],
        sql: "CREATE VIEW IF NOT EXISTS v_employee_hours AS
            SELECT
                e.id,
                e.name,
                e.role,
                e.hourly_rate,
                COALESCE(SUM(t.hours), 0) AS total_hours,
                COALESCE(SUM(t.hours * e.hourly_rate), 0) AS total_value
            FROM employees e
            LEFT JOIN time_entries t ON e.id = t.employee_id
            GROUP BY e.id",
    },
];
