#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated,
    TaskCreatedDescription,
    TaskCreateFailed,
    TaskUpdated,
    TaskUpdatedDescription,
    TaskUpdateFailed,
    TaskDeleted,
    TaskDeletedDescription,
    TaskDeleteFailed,
    TasksHeader,
    TasksProjectHeader(String), // project name
    TasksShown(usize, usize),   // shown, total
    NoTasksFound,
    TasksAdjustFilters,
    TasksGetStarted,
    TaskNotFoundWithId(String),
    TaskAlreadyCompleted(String),
    TaskAdvanced(String, String), // title, new status label
    ConfirmDeleteTask(String),
    NoChangesDetected,
    EditingTask(String),
    SelectTask,
    SelectTaskToEdit,
    SelectTaskAction,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskStatus,
    PromptTaskPriority,
    PromptTaskDueDate,
    PromptTaskProject,
    NoProjectOption,

    // === PROJECT MESSAGES ===
    ProjectCreated,
    ProjectCreatedDescription,
    ProjectCreateFailed,
    ProjectUpdated,
    ProjectUpdatedDescription,
    ProjectUpdateFailed,
    ProjectDeleted,
    ProjectDeletedDescription,
    ProjectDeleteFailed,
    ProjectsHeader,
    NoProjectsFound,
    ProjectNotFound(String),
    ConfirmDeleteProject(String),
    ConfirmDeleteProjectWithTasks(String, usize),
    EditingProject(String),
    SelectProject,
    SelectProjectAction,
    PromptProjectName,
    PromptProjectDescription,
    ProjectCreatedOn(String),
    ProjectUpdatedOn(String),

    // === DASHBOARD MESSAGES ===
    DashboardHeader,
    DashboardWelcome,
    CompletionRate(u32),

    // === CALENDAR MESSAGES ===
    CalendarHeader(String), // month
    NoTasksWithDueDate,
    UpcomingHeader,
    NoUpcomingTasks,
    InvalidMonth(String),
    DueOverdue(String), // due date

    // === AUTH MESSAGES ===
    NotAuthenticated,
    LoggedIn(String),
    LoggedOut,
    LoginFailed,
    WrongPassword(i32),
    SessionExpired,
    PromptEmail,
    PromptPassword,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleBackend,
    BackendNotConfigured,
    PromptSelectModules,
    PromptBackendUrl,
    PromptBackendAnonKey,

    // === GENERIC MESSAGES ===
    OperationCancelled,
    InvalidInput(String),
}
